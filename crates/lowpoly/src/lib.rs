#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lowpoly_image as image;

#[doc(inline)]
pub use lowpoly_imgproc as imgproc;

#[doc(inline)]
pub use lowpoly_io as io;
