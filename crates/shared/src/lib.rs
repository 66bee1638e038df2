pub mod host;
pub mod messages;
pub mod normalize;
pub mod print_options;

pub use host::{coerce_bool, coerce_f64, coerce_i64, DocumentKind, HostDocument};
pub use messages::{ModuleMessage, RotationAngle, RotationDir, RotationMode};
pub use normalize::{collection_values, entry_list, first_entry, string_list};
pub use print_options::{PaperSize, PortraitMode, PrintMode, PrintOptions, SheetKind};
