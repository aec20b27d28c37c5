//! Generación de sitemap.xml: páginas estáticas + preguntas respondidas

use crate::models::question::Question;

/// Páginas públicas fijas
pub const STATIC_PATHS: [&str; 5] = [
    "/",
    "/login",
    "/register/client",
    "/reservation-rapide/",
    "/faq/",
];

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn url_entry(base_url: &str, path: &str, lastmod: Option<String>, changefreq: &str, priority: &str) -> String {
    let mut entry = format!(
        "  <url>\n    <loc>{}{}</loc>\n",
        escape_xml(base_url.trim_end_matches('/')),
        escape_xml(path)
    );
    if let Some(lastmod) = lastmod {
        entry.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    entry.push_str(&format!(
        "    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        changefreq, priority
    ));
    entry
}

/// Construir el documento XML
pub fn render_sitemap(base_url: &str, answered: &[Question]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for path in STATIC_PATHS {
        xml.push_str(&url_entry(base_url, path, None, "monthly", "0.8"));
    }

    for question in answered {
        let lastmod = question
            .answered_at
            .unwrap_or(question.created_at)
            .format("%Y-%m-%d")
            .to_string();
        xml.push_str(&url_entry(
            base_url,
            &format!("/faq/{}/", question.id),
            Some(lastmod),
            "daily",
            "0.9",
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}
