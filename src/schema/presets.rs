use crate::schema::model::{DeriveRule, FieldSchema, InputTransform, Schema};

pub const LEAGUES: [&str; 5] = ["NFL", "NBA", "MLB", "NHL", "MLS"];

/// Blog post form: the slug follows the title unless edited directly.
pub fn blog_post() -> Schema {
    Schema::builder()
        .field(
            "title",
            FieldSchema::text()
                .required_message("Title is required")
                .description("Enter a post title"),
        )
        .field(
            "slug",
            FieldSchema::text()
                .required_message("Slug is required")
                .description("Enter a unique slug for this post")
                .derive_from("title", DeriveRule::Slug)
                .input_transform(InputTransform::Slug),
        )
        .field(
            "publishDate",
            FieldSchema::date().required_message("Publish date is required"),
        )
        .field(
            "topic",
            FieldSchema::enumeration(LEAGUES)
                .required_message("Topic is required")
                .description("Select a topic for this post"),
        )
        .field(
            "featured",
            FieldSchema::boolean()
                .description("Will this post be featured?")
                .optional(),
        )
        .build()
}
