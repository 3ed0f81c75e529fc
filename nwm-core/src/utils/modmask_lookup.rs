use bitflags::bitflags;
use serde::{Deserialize, Serialize, de::Visitor};

bitflags! {
    /// Represents the state of modifier keys. The bits are the X11 modifier mask bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Used as the zero value
        const Zero = 0;
        const Shift = 1;
        /// Caps lock
        const Lock = 1 << 1;
        const Control = 1 << 2;
        /// Mod1
        const Alt = 1 << 3;
        /// Mod2
        const NumLock = 1 << 4;
        const Mod3 = 1 << 5;
        /// Mod4
        const Super = 1 << 6;
        const Mod5 = 1 << 7;
    }
}
bitflags! {
    /// Represents the state of the mouse buttons
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Button: u8 {
        /// Used as the zero value
        const Zero = 0;
        /// Main button (left click for right-handed)
        const Button1 = 1;
        /// Middle button (pressing the scroll wheel)
        const Button2 = 1 << 1;
        /// Secondary button (right click for right-handed)
        const Button3 = 1 << 2;
        /// Scroll wheel up
        const Button4 = 1 << 3;
        /// Scroll wheel down
        const Button5 = 1 << 4;
    }
}

impl ModMask {
    /// Drops the lock bits so chords match whatever the state of caps and num lock.
    #[must_use]
    pub fn clean(self) -> Self {
        self.difference(Self::Lock | Self::NumLock)
            .intersection(
                Self::Shift | Self::Control | Self::Alt | Self::Mod3 | Self::Super | Self::Mod5,
            )
    }
}

#[must_use]
pub fn into_modmask(keys: &[String]) -> ModMask {
    keys.iter()
        .fold(ModMask::Zero, |mask, s| mask | into_mod(s))
        .clean()
}

#[must_use]
pub fn into_mod(key: &str) -> ModMask {
    match key {
        "Shift" => ModMask::Shift,
        "Control" => ModMask::Control,
        "Mod1" | "Alt" => ModMask::Alt,
        "Mod3" => ModMask::Mod3,
        "Mod4" | "Super" => ModMask::Super,
        "Mod5" => ModMask::Mod5,
        _ => ModMask::Zero,
    }
}

// serde impls (derive is not working with the bitflags macro)

impl Serialize for ModMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for ModMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ModmaskVisitor;

        impl Visitor<'_> for ModmaskVisitor {
            type Value = ModMask;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an X11 modifier mask")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u16::try_from(v)
                    .map(ModMask::from_bits_truncate)
                    .map_err(|_| E::custom("modifier mask out of range"))
            }
        }

        deserializer.deserialize_u16(ModmaskVisitor)
    }
}

impl Serialize for Button {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Button {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ButtonVisitor;

        impl Visitor<'_> for ButtonVisitor {
            type Value = Button;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bitfield on 8 bits")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(v)
                    .map(Button::from_bits_truncate)
                    .map_err(|_| E::custom("button mask out of range"))
            }
        }

        deserializer.deserialize_u8(ButtonVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_bits_are_ignored_when_matching() {
        let pressed = ModMask::Super | ModMask::NumLock | ModMask::Lock;
        assert_eq!(pressed.clean(), ModMask::Super);
    }

    #[test]
    fn names_map_to_x11_bits() {
        let mask = into_modmask(&["Mod4".to_owned(), "Shift".to_owned()]);
        assert_eq!(mask.bits(), 64 | 1);
        assert_eq!(into_mod("Alt").bits(), 8);
        assert_eq!(into_mod("Hyper"), ModMask::Zero);
    }
}
