use super::TileArea;
use crate::models::Xyhw;

/// Layout which splits the area into two columns, gives one window all of the left column,
/// and divides the right column among all the other windows.
pub fn update(area: &TileArea, master_factor: f32, count: usize) -> Vec<Xyhw> {
    match count {
        0 => vec![],
        1 => vec![area.full()],
        _ => {
            let g = area.gap;
            let b = area.border;
            let n = count as i32;
            let master_px = master_width(area, master_factor);

            let mut rects = Vec::with_capacity(count);
            rects.push(Xyhw::new(
                area.x + g,
                area.y + g,
                master_px - g - g / 2 - 2 * b,
                area.h - 2 * g - 2 * b,
            ));

            //stack all the others
            let stack_x = area.x + master_px + g / 2;
            let stack_w = area.w - master_px - g - g / 2 - 2 * b;
            let stack_h = (area.h - g * n) / (n - 1) - 2 * b;
            for i in 1..n {
                let y = area.y + g + (i - 1) * (stack_h + g + 2 * b);
                rects.push(Xyhw::new(stack_x, y, stack_w, stack_h));
            }
            rects
        }
    }
}

fn master_width(area: &TileArea, master_factor: f32) -> i32 {
    (area.w as f32 * master_factor) as i32
}

/// The list index a window dropped at `(x, y)` should move to. The left half of the area is
/// the master slot whatever the master factor, the right half is split into stack rows.
pub fn slot_at(area: &TileArea, count: usize, x: i32, y: i32) -> usize {
    if count < 2 || x < area.x + area.w / 2 {
        return 0;
    }
    let rows = count - 1;
    let row_h = (area.h / rows as i32).max(1);
    let row = ((y - area.y).max(0) / row_h) as usize;
    1 + row.min(rows - 1)
}
