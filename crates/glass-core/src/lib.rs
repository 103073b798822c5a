//! # glass - image preprocessing for a desktop image viewer
//!
//! Every decoded image goes through the same short normalization before it
//! is shown:
//!
//! - **Orientation**: the EXIF orientation flag is turned into a rotation and
//!   an optional mirror, and baked into the pixels.
//! - **Color profile**: an embedded ICC profile has its color space trusted;
//!   untagged images can be given sRGB; a user-selected target profile
//!   (built-in name or ICC file) can override both.
//!
//! Decoding and rotation use the `image` crate, EXIF parsing uses
//! `kamadak-exif`, and ICC parsing and pixel transforms use `moxcms`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use glass_core::{Image, PreprocessOptions, preprocess};
//!
//! let mut image = Image::open("photo.jpg")?;
//! let options = PreprocessOptions {
//!     color_profile: "AdobeRGB1998".into(),
//!     apply_to_all: true,
//! };
//! preprocess(&mut image, &options)?;
//! image.save("photo-upright.png")?;
//! # Ok::<(), glass_core::Error>(())
//! ```
//!
//! Viewer preferences live in [`settings::Settings`], loaded from and stored
//! to a [`settings::ConfigFile`].

pub mod builtin;
pub mod error;
pub mod orientation;
pub mod preprocess;
pub mod profile;
pub mod raster;
pub mod resolve;
pub mod settings;
pub mod transform;
pub mod types;

pub use builtin::{BuiltinProfile, builtin_profile_names};
pub use error::{Error, Result};
pub use orientation::{ExifOrientation, orientation_degrees, read_orientation_flag};
pub use preprocess::{PreprocessOptions, apply_exif_orientation, normalize_color_profile, preprocess};
pub use profile::{ColorProfile, ProfileOrigin};
pub use raster::Image;
pub use resolve::{ProfileSelector, canonical_profile_name, load_profile, resolve_selector};
pub use transform::{Layout, RenderingIntent, Transform, TransformOptions};
pub use types::{ColorSpace, ProfileClass, Rotation};

/// Version of glass
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
