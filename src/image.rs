mod load;
mod meta;
mod texture;

pub use load::{ImageKind, UploadedImage, decode_image_from_bytes, decode_image_from_path};
pub use meta::{ImageMeta, InfoRow, dimension_rows, human_readable_bytes};
pub use texture::ImageTexture;
