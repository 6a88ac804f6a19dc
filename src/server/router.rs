//! Route table and OpenAPI document.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{analytics, auth, blog, category, comic, genre, maintenance, subscriber, tag, user},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PanelPress API",
        description = "Comics, blog posts and newsletter subscriptions"
    ),
    modifiers(&BearerAuth)
)]
struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds every API route plus Swagger UI at `/swagger-ui` serving `/api-docs/openapi.json`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // auth
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::me))
        .routes(routes!(auth::change_password))
        // users
        .routes(routes!(user::get_users))
        .routes(routes!(user::get_user, user::delete_user))
        .routes(routes!(user::set_user_role))
        // genres
        .routes(routes!(genre::get_genres, genre::create_genre))
        .routes(routes!(genre::get_genre_by_slug))
        .routes(routes!(genre::update_genre, genre::delete_genre))
        // tags
        .routes(routes!(tag::get_tags, tag::create_tag))
        .routes(routes!(tag::get_tag_cloud))
        .routes(routes!(tag::get_tag_by_slug))
        .routes(routes!(tag::update_tag, tag::delete_tag))
        // categories
        .routes(routes!(category::get_categories, category::create_category))
        .routes(routes!(category::get_category_by_slug))
        .routes(routes!(category::update_category, category::delete_category))
        // comics
        .routes(routes!(comic::get_comics, comic::create_comic))
        .routes(routes!(comic::get_comic_by_slug))
        .routes(routes!(
            comic::get_comic,
            comic::update_comic,
            comic::delete_comic
        ))
        .routes(routes!(comic::restore_comic))
        .routes(routes!(
            comic::get_comic_like,
            comic::like_comic,
            comic::unlike_comic
        ))
        .routes(routes!(comic::get_comic_pages, comic::create_comic_page))
        .routes(routes!(comic::update_comic_page, comic::delete_comic_page))
        // blog
        .routes(routes!(blog::get_blog_posts, blog::create_blog_post))
        .routes(routes!(blog::get_blog_post_by_slug))
        .routes(routes!(
            blog::get_blog_post,
            blog::update_blog_post,
            blog::delete_blog_post
        ))
        .routes(routes!(blog::restore_blog_post))
        .routes(routes!(
            blog::get_blog_post_like,
            blog::like_blog_post,
            blog::unlike_blog_post
        ))
        // subscribers
        .routes(routes!(subscriber::subscribe, subscriber::get_subscribers))
        .routes(routes!(subscriber::unsubscribe))
        .routes(routes!(
            subscriber::get_subscriber,
            subscriber::delete_subscriber
        ))
        // admin
        .routes(routes!(analytics::get_overview))
        .routes(routes!(analytics::get_top_content))
        .routes(routes!(analytics::get_genre_distribution))
        .routes(routes!(analytics::get_activity))
        .routes(routes!(maintenance::recount_counters))
        .split_for_parts();

    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
}

#[cfg(test)]
mod test;
