use crate::models::Xyhw;

/// A partial geometry request, as sent by a client asking to be moved or resized.
#[derive(Default, Clone, Debug, PartialEq, Eq, Copy)]
pub struct XyhwChange {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub h: Option<i32>,
    pub w: Option<i32>,
}

impl From<Xyhw> for XyhwChange {
    fn from(xyhw: Xyhw) -> Self {
        Self {
            x: Some(xyhw.x),
            y: Some(xyhw.y),
            w: Some(xyhw.w),
            h: Some(xyhw.h),
        }
    }
}

impl XyhwChange {
    /// Applies the requested fields, returning whether anything changed.
    pub fn update(&self, xyhw: &mut Xyhw) -> bool {
        let mut changed = false;
        if let Some(x) = self.x {
            if xyhw.x != x {
                xyhw.x = x;
                changed = true;
            }
        }
        if let Some(y) = self.y {
            if xyhw.y != y {
                xyhw.y = y;
                changed = true;
            }
        }
        if let Some(w) = self.w {
            if xyhw.w != w {
                xyhw.w = w;
                changed = true;
            }
        }
        if let Some(h) = self.h {
            if xyhw.h != h {
                xyhw.h = h;
                changed = true;
            }
        }
        changed
    }
}
