//! Settings: the menu's data model and the normalization boundary that
//! turns caller-supplied declarations (settings and mock descriptors, in
//! Rust or JSON) into a uniform list.

mod mock;
mod normalize;
mod types;

pub use mock::entry_from_mock;
pub use mock::DynamicResponse;
pub use mock::MockDescriptor;
pub use mock::MockMeta;
pub use mock::MockRequest;
pub use mock::MockRequestMatcher;
pub use mock::MockResponse;
pub use mock::MockResponseEntry;
pub use mock::StaticResponse;

pub use normalize::normalize;
pub use normalize::source_from_value;
pub use normalize::sources_from_json;
pub use normalize::SettingSource;

pub use types::LinkOption;
pub use types::LinksSetting;
pub use types::OptionValue;
pub use types::SelectOption;
pub use types::SelectSetting;
pub use types::Setting;
pub use types::TextSetting;
