mod helpers;
mod landing;
mod registration;
mod verification;
