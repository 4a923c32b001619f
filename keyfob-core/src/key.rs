use secrecy::{ExposeSecret, Zeroize};

/// The shared secret of an OTP account that should be kept private as much as possible.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Key(Vec<u8>);

impl Key {
    #[must_use]
    pub fn new(content: Vec<u8>) -> Self {
        Self(content)
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for Key {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ExposeSecret<Vec<u8>> for Key {
    fn expose_secret(&self) -> &Vec<u8> {
        &self.0
    }
}

#[cfg(test)]
impl secrecy::DebugSecret for Key {}
