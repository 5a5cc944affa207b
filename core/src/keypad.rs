/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// Tracks the pressed status of keys 0..F and, while a program waits for
/// input, which register the next pressed key should be written to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; 16],
    waiting: Option<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pressed status of `key`.
    ///
    /// Returns the register waiting for a key along with the key that
    /// satisfied it, clearing the wait so it is only captured once.
    pub fn press(&mut self, key: u8) -> Option<(u8, u8)> {
        let key = key & 0xF;
        self.pressed[key as usize] = true;
        self.waiting.take().map(|register| (register, key))
    }

    pub fn release(&mut self, key: u8) {
        self.pressed[(key & 0xF) as usize] = false;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0xF) as usize]
    }

    /// Wait for the next key press and capture it into `register`
    pub fn wait_for(&mut self, register: u8) {
        self.waiting = Some(register & 0xF);
    }

    /// The register waiting for a key press, if any
    pub fn waiting(&self) -> Option<u8> {
        self.waiting
    }
}
