
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A fake backlight class directory, removed when dropped.
pub struct FakeBacklightClass {
    root: PathBuf,
}

impl FakeBacklightClass {
    /// `name` has to be unique among the tests, since they run in parallel
    pub fn new(name: &str) -> FakeBacklightClass {
        let root = std::env::temp_dir().join(format!("bright-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).expect("Couldn't create fake backlight class");
        FakeBacklightClass { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_device(&self, device: &str, brightness: &str, max_brightness: Option<&str>) -> PathBuf {
        let device_path = self.root.join(device);
        fs::create_dir_all(&device_path).expect("Couldn't create fake device");
        fs::write(device_path.join("brightness"), brightness).expect("Couldn't write brightness");
        if let Some(max) = max_brightness {
            fs::write(device_path.join("max_brightness"), max).expect("Couldn't write max_brightness");
        }
        device_path
    }

    pub fn brightness(&self, device: &str) -> String {
        fs::read_to_string(self.root.join(device).join("brightness")).expect("Couldn't read brightness")
    }
}

impl Drop for FakeBacklightClass {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
