//! One-shot content generation: poems, blog posts and images

pub mod blog;
pub mod image;
pub mod poem;

pub use blog::{blog_prompt, generate_blog, BLOG_TEMPLATE};
pub use image::{generate_image, image_request, save_image, ImageOptions, DEFAULT_IMAGE_PROMPT};
pub use poem::{generate_poem, poem_prompt, DEFAULT_POEM_TOPIC, POEM_TEMPLATE};
