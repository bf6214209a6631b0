#![cfg_attr(not(test), no_std)]

bitflags::bitflags! {
    /// Mask of held buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const LEFT = 0b0000_0001;
        const RIGHT = 0b0000_0010;
        const UP = 0b0000_0100;
        const DOWN = 0b0000_1000;
        const A = 0b0001_0000;
        const B = 0b0010_0000;
    }
}

/// Samples which buttons are currently held. Debouncing is the source's job.
pub trait ButtonSource {
    fn buttons(&mut self) -> Buttons;
}

impl<F: FnMut() -> Buttons> ButtonSource for F {
    #[inline]
    fn buttons(&mut self) -> Buttons {
        self()
    }
}

/// Current and previous button masks, for edge detection between polls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    current: Buttons,
    previous: Buttons,
}

impl ButtonState {
    pub const fn new() -> Self {
        ButtonState {
            current: Buttons::empty(),
            previous: Buttons::empty(),
        }
    }

    pub fn poll(&mut self, current: Buttons) {
        self.previous = self.current;
        self.current = current;
    }

    /// All of `buttons` are held.
    #[inline]
    pub fn pressed(&self, buttons: Buttons) -> bool {
        self.current.contains(buttons)
    }

    /// None of `buttons` are held.
    #[inline]
    pub fn not_pressed(&self, buttons: Buttons) -> bool {
        !self.current.intersects(buttons)
    }

    #[inline]
    pub fn just_pressed(&self, button: Buttons) -> bool {
        !self.previous.contains(button) && self.current.contains(button)
    }

    #[inline]
    pub fn just_released(&self, button: Buttons) -> bool {
        self.previous.contains(button) && !self.current.contains(button)
    }

    #[inline]
    pub fn current(&self) -> Buttons {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Buttons {
        self.previous
    }
}

macro_rules! button_shorthands {
    ($($held:ident, $edge:ident => $button:ident;)*) => {
        impl ButtonState {
            $(
                #[inline]
                pub fn $held(&self) -> bool {
                    self.pressed(Buttons::$button)
                }

                #[inline]
                pub fn $edge(&self) -> bool {
                    self.just_pressed(Buttons::$button)
                }
            )*
        }
    };
}

button_shorthands! {
    up, just_pressed_up => UP;
    down, just_pressed_down => DOWN;
    left, just_pressed_left => LEFT;
    right, just_pressed_right => RIGHT;
    a, just_pressed_a => A;
    b, just_pressed_b => B;
}
