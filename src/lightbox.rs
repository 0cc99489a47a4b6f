use serde::{Deserialize, Serialize};

/// Full-size photo overlay. Shows at most one image at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LightboxState {
    pub is_open: bool,
    pub active_image: Option<String>,
    pub active_index: usize,
}

impl LightboxState {
    /// Open on photo `index` of `images`. Out-of-range selections are ignored.
    pub fn open(&mut self, index: usize, images: &[String]) -> bool {
        match images.get(index) {
            Some(url) => {
                self.is_open = true;
                self.active_image = Some(url.clone());
                self.active_index = index;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        *self = LightboxState::default();
    }
}
