//! Build configurations.

catalog_id! {
    /// A build variant.
    pub enum Configuration: "configuration" {
        Debug => "debug",
        Release => "release",
    }
}

impl Configuration {
    /// Display name used in step titles.
    pub fn name(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }

    /// The `-configuration` value passed to `xcodebuild`.
    pub fn xcode_id(&self) -> &'static str {
        self.name()
    }

    pub fn is_release(&self) -> bool {
        *self == Configuration::Release
    }
}
