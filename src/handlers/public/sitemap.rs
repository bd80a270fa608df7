use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::config;
use crate::services::BlogPost;
use crate::state::AppState;

/// Pages that exist regardless of content.
const STATIC_ROUTES: &[&str] = &["/", "/about", "/services", "/pricing", "/blog", "/contact"];

/// GET /sitemap.xml - static routes plus one entry per blog post.
///
/// An unreachable blog feed degrades to the static entries; crawlers prefer a
/// partial sitemap over a 5xx.
pub async fn sitemap_get(State(state): State<AppState>) -> impl IntoResponse {
    let posts = match state.blog.list_posts().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("blog feed unavailable for sitemap: {}", e);
            vec![]
        }
    };

    let xml = render_sitemap(&config::config().site.base_url, &posts);

    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

pub fn render_sitemap(base_url: &str, posts: &[BlogPost]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for route in STATIC_ROUTES {
        push_url(&mut xml, &format!("{}{}", base, if *route == "/" { "" } else { route }), None);
    }

    for post in posts {
        push_url(
            &mut xml,
            &format!("{}/blog/{}", base, post.slug),
            post.published_at.as_deref(),
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", loc));
    if let Some(date) = lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date));
    }
    xml.push_str("  </url>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes_are_always_present() {
        let xml = render_sitemap("https://example.com", &[]);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<loc>https://example.com/pricing</loc>"));
        assert!(!xml.contains("/blog/"));
    }

    #[test]
    fn blog_posts_each_get_an_entry() {
        let posts = vec![
            BlogPost {
                slug: "first-post".to_string(),
                title: "First".to_string(),
                published_at: Some("2026-01-15".to_string()),
            },
            BlogPost {
                slug: "second-post".to_string(),
                title: "Second".to_string(),
                published_at: None,
            },
        ];
        let xml = render_sitemap("https://example.com/", &posts);
        assert!(xml.contains("<loc>https://example.com/blog/first-post</loc>"));
        assert!(xml.contains("<lastmod>2026-01-15</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/blog/second-post</loc>"));
    }
}
