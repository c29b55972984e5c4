mod cloudinary;

pub use cloudinary::{CloudinaryCredentials, CloudinaryImageStore};
