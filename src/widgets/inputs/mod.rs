pub mod date;
pub mod select;
pub mod text;
pub mod toggle;

pub use date::DatePicker;
pub use select::SelectInput;
pub use text::TextInput;
pub use toggle::ToggleInput;
