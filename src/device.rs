/// XUSB report button bits, as published in ViGEmClient's `XUSB_GAMEPAD_*`
/// constants (identical to XInput's `XINPUT_GAMEPAD_*`).
pub mod buttons {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const GUIDE: u16 = 0x0400;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;

    /// The four D-pad bits occupy the low nibble.
    pub const DPAD_MASK: u16 = DPAD_UP | DPAD_DOWN | DPAD_LEFT | DPAD_RIGHT;
}

/// XInput gamepad state pushed to the virtual controller.
///
/// Only `buttons` is ever driven; triggers and sticks stay centered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl GamepadState {
    /// Face-button rule: OR the bit in when it is clear, XOR it out when set.
    pub fn toggle_face(&mut self, button: u16) {
        if self.buttons & button == 0 {
            self.buttons |= button;
        } else {
            self.buttons ^= button;
        }
    }

    /// D-pad rule: clear the low nibble, then set exactly `direction`.
    pub fn set_dpad(&mut self, direction: u16) {
        self.buttons &= !buttons::DPAD_MASK;
        self.buttons |= direction;
    }

    pub fn dpad(&self) -> u16 {
        self.buttons & buttons::DPAD_MASK
    }

    pub fn is_pressed(&self, button: u16) -> bool {
        self.buttons & button == button
    }
}
