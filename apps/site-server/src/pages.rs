//! HTML templates
//!
//! Plain `format!` over raw strings. Every interpolated value that came from
//! content files goes through [`escape_html`]; rendered markdown is inserted
//! as-is.

use axum::http::StatusCode;
use lead_form::{FORM_NAME, FORM_NAME_FIELD, HONEYPOT_FIELD, LEAD_FIELDS};
use site_content::{CityDocument, RenderedCity, TocEntry};

use crate::config::SITE_NAME;

/// Module script that loads the wasm bundle
pub const WASM_MODULE: &str = "/pkg/leads_wasm.js";

/// DOM id of the lead form on city pages
pub const LEAD_FORM_ID: &str = "lead-form";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A JavaScript string literal that is safe inside a `<script>` element
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('<', "\\u003c")
}

pub fn city_href(slug: &str) -> String {
    format!("/cities/{}/", slug)
}

/// City name for display, falling back to the slug when front matter is blank
fn city_name(doc_city: &str, slug: &str) -> String {
    if doc_city.trim().is_empty() {
        slug.to_string()
    } else {
        doc_city.to_string()
    }
}

fn layout(title: &str, description: &str, main: &str, footer_cities: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; color: #1f2937; line-height: 1.6; }}
        header, footer {{ background: #14532d; color: #fff; padding: 16px 24px; }}
        header a, footer a {{ color: #fff; text-decoration: none; }}
        main {{ max-width: 960px; margin: 0 auto; padding: 24px; }}
        .visually-hidden {{ position: absolute; left: -9999px; }}
        .lead-form {{ background: #f0fdf4; border: 1px solid #bbf7d0; border-radius: 8px; padding: 24px; margin: 24px 0; }}
        .lead-form label {{ display: block; margin-top: 12px; font-weight: 600; }}
        .lead-form input, .lead-form textarea {{ width: 100%; padding: 8px; box-sizing: border-box; }}
        .lead-form button {{ margin-top: 16px; background: #16a34a; color: #fff; border: 0; padding: 12px 24px; border-radius: 6px; font-size: 16px; cursor: pointer; }}
        .lead-form button:disabled {{ opacity: 0.6; cursor: wait; }}
        .company-info-container {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 8px; background: #f9fafb; border-radius: 8px; padding: 16px; }}
        .company-info-label {{ display: block; font-size: 13px; color: #6b7280; }}
        .toc {{ background: #f9fafb; border-left: 4px solid #16a34a; padding: 12px 24px; }}
        .toc .level-3 {{ margin-left: 16px; }}
    </style>
</head>
<body>
    <header><a href="/">{site}</a></header>
    <main>
{main}
    </main>
    <footer>
        <p>Serving: {footer_cities}</p>
        <p>&copy; {site}. We connect you with independent local junk removal companies.</p>
    </footer>
</body>
</html>
"#,
        title = escape_html(title),
        description = escape_html(description),
        site = SITE_NAME,
        main = main,
        footer_cities = footer_cities,
    )
}

fn footer_links(cities: &[CityDocument]) -> String {
    cities
        .iter()
        .map(|doc| {
            format!(
                r#"<a href="{}">{}</a>"#,
                city_href(&doc.slug),
                escape_html(&city_name(&doc.front_matter.city, &doc.slug))
            )
        })
        .collect::<Vec<_>>()
        .join(" &middot; ")
}

pub fn home_page(cities: &[CityDocument]) -> String {
    let cards: String = cities
        .iter()
        .map(|doc| {
            let fm = &doc.front_matter;
            format!(
                r#"            <li><a href="{href}"><strong>{city}</strong>{state}</a><p>{description}</p></li>
"#,
                href = city_href(&doc.slug),
                city = escape_html(&city_name(&fm.city, &doc.slug)),
                state = if fm.state.is_empty() {
                    String::new()
                } else {
                    format!(", {}", escape_html(&fm.state))
                },
                description = escape_html(&fm.description),
            )
        })
        .collect();

    let main = format!(
        r#"        <section class="hero">
            <h1>Compare Junk Removal Quotes in Your City</h1>
            <p>Tell us what needs to go. We send your request to top-rated local companies and you get free quotes within 2 hours.</p>
        </section>
        <section class="how-it-works">
            <h2>How It Works</h2>
            <ol>
                <li>Pick your city and describe the items you want removed.</li>
                <li>Local licensed professionals review your request.</li>
                <li>Compare quotes and book the one that suits you.</li>
            </ol>
        </section>
        <section class="cities">
            <h2>Available Cities</h2>
            <ul>
{cards}            </ul>
        </section>"#,
    );

    layout(
        &format!("{} | Free Junk Removal Quotes", SITE_NAME),
        "Compare free quotes from top-rated junk removal companies near you.",
        &main,
        &footer_links(cities),
    )
}

fn toc_list(toc: &[TocEntry]) -> String {
    // The body's own "Table of Contents" heading is not a destination
    let items: String = toc
        .iter()
        .filter(|entry| entry.id != "table-of-contents")
        .map(|entry| {
            format!(
                r##"                <li class="level-{}"><a href="#{}">{}</a></li>
"##,
                entry.level,
                entry.id,
                escape_html(&entry.text)
            )
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }
    format!(
        r#"        <nav class="toc" aria-label="On this page">
            <h2>On This Page</h2>
            <ul>
{items}            </ul>
        </nav>
"#
    )
}

/// The lead form plus its confirmation panel and the script that mounts it
pub fn lead_form(city: &str, state: &str) -> String {
    let city_html = escape_html(city);
    let state_html = escape_html(state);
    format!(
        r#"        <section class="lead-form" id="get-quotes">
            <h2>Get Free Quotes from Top Junk Removal Services</h2>
            <p>Compare prices from licensed professionals in {city_html}{state_suffix}</p>
            <form id="{form_id}" name="{form_name}" method="POST" data-netlify="true" netlify-honeypot="{honeypot}">
                <input type="hidden" name="{form_name_field}" value="{form_name}">
                <input type="hidden" name="city" value="{city_html}">
                <input type="hidden" name="state" value="{state_html}">
                <p class="visually-hidden" aria-hidden="true">
                    <label>Leave this empty: <input name="{honeypot}" tabindex="-1" autocomplete="off"></label>
                </p>
                <label for="lead-name">Full Name</label>
                <input id="lead-name" type="text" name="name" autocomplete="name" required>
                <label for="lead-phone">Phone</label>
                <input id="lead-phone" type="tel" name="phone" autocomplete="tel" required>
                <label for="lead-email">Email</label>
                <input id="lead-email" type="email" name="email" autocomplete="email" required>
                <label for="lead-message">What needs to go? (optional)</label>
                <textarea id="lead-message" name="message" rows="3"></textarea>
                <button type="submit">Get My Free Quotes</button>
            </form>
            <div class="lead-form-confirmation" data-lead-confirmation hidden>
                <h3>Thank You!</h3>
                <p>Your request has been received.</p>
                <p data-lead-confirmation-message>Our team will contact you within 2 hours with free quotes from top-rated professionals in {city_html}.</p>
            </div>
        </section>
        <script type="module">
            import init, {{ mount_lead_form }} from '{module}';
            await init();
            mount_lead_form('{form_id}', {city_js}, {state_js});
        </script>
"#,
        state_suffix = if state.is_empty() {
            String::new()
        } else {
            format!(", {}", state_html)
        },
        form_id = LEAD_FORM_ID,
        form_name = FORM_NAME,
        form_name_field = FORM_NAME_FIELD,
        honeypot = HONEYPOT_FIELD,
        module = WASM_MODULE,
        city_js = js_string(city),
        state_js = js_string(state),
    )
}

pub fn city_page(page: &RenderedCity, cities: &[CityDocument]) -> String {
    let fm = &page.front_matter;
    let city = city_name(&fm.city, &page.slug);
    let title = if fm.title.is_empty() {
        format!("Junk Removal in {}", city)
    } else {
        fm.title.clone()
    };

    let main = format!(
        r##"        <nav class="breadcrumb" aria-label="Breadcrumb"><a href="/">Home</a> &rsaquo; <span>{city_html}</span></nav>
        <h1>{title_html}</h1>
        <p class="lead">{description}</p>
{form}        <section class="value">
            <h2>Compare Quotes from Top {city_html} Companies</h2>
            <p>One request reaches several local companies, so you can compare prices without calling around.</p>
        </section>
{toc}        <article class="city-content">
{body}
        </article>
        <p class="cta"><a href="#get-quotes">Get your free {city_html} junk removal quotes</a></p>"##,
        city_html = escape_html(&city),
        title_html = escape_html(&title),
        description = escape_html(&fm.description),
        form = lead_form(&city, &fm.state),
        toc = toc_list(&page.toc),
        body = page.html,
    );

    layout(
        &format!("{} | {}", title, SITE_NAME),
        &fm.description,
        &main,
        &footer_links(cities),
    )
}

/// Hidden copy of the lead form so static form backends can detect its fields
pub fn form_registration_page() -> String {
    let inputs: String = LEAD_FIELDS
        .iter()
        .filter(|name| **name != FORM_NAME_FIELD)
        .map(|name| match *name {
            "message" => format!(r#"        <textarea name="{}"></textarea>
"#, name),
            _ => format!(r#"        <input type="text" name="{}">
"#, name),
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="robots" content="noindex">
    <title>Form registration</title>
</head>
<body>
    <form name="{form_name}" method="POST" data-netlify="true" netlify-honeypot="{honeypot}" hidden>
        <input type="hidden" name="{form_name_field}" value="{form_name}">
{inputs}    </form>
</body>
</html>
"#,
        form_name = FORM_NAME,
        form_name_field = FORM_NAME_FIELD,
        honeypot = HONEYPOT_FIELD,
    )
}

pub fn not_found_page() -> String {
    layout(
        &format!("Page not found | {}", SITE_NAME),
        "Page not found",
        r#"        <h1>Page not found</h1>
        <p>We don't have a page for that address. <a href="/">See the cities we serve.</a></p>"#,
        "",
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let main = format!(
        r#"        <h1>{code} {reason}</h1>
        <p>{message}</p>
        <p><a href="/">Back to the home page</a></p>"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape_html(message),
    );
    layout(
        &format!("{} | {}", status.as_u16(), SITE_NAME),
        "Error",
        &main,
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use site_content::CityFrontMatter;

    fn doc(slug: &str, city: &str, state: &str) -> CityDocument {
        CityDocument {
            slug: slug.to_string(),
            front_matter: CityFrontMatter {
                city: city.to_string(),
                state: state.to_string(),
                ..Default::default()
            },
            body: String::new(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Oakville"), "Oakville");
    }

    #[test]
    fn test_js_string_cannot_close_script() {
        let literal = js_string("</script><script>alert(1)");
        assert!(!literal.contains("</script>"));
        assert!(literal.starts_with('"') && literal.ends_with('"'));
    }

    #[test]
    fn test_lead_form_carries_hidden_fields() {
        let html = lead_form("St. Catharines", "Ontario");
        assert!(html.contains(r#"<input type="hidden" name="form-name" value="junk-removal-leads">"#));
        assert!(html.contains(r#"<input type="hidden" name="city" value="St. Catharines">"#));
        assert!(html.contains(r#"<input type="hidden" name="state" value="Ontario">"#));
        assert!(html.contains(r#"name="bot-field""#));
        assert!(html.contains(r#"mount_lead_form('lead-form', "St. Catharines", "Ontario");"#));
        assert!(html.contains("data-lead-confirmation hidden"));
    }

    #[test]
    fn test_lead_form_escapes_city() {
        let html = lead_form(r#"A"><script>"#, "");
        assert!(html.contains(r#"value="A&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains(r#"value="A"><script>"#));
    }

    #[test]
    fn test_home_page_links_every_city() {
        let cities = vec![doc("oakville", "Oakville", "Ontario"), doc("toronto", "", "")];
        let html = home_page(&cities);
        assert!(html.contains(r#"<a href="/cities/oakville/"><strong>Oakville</strong>, Ontario</a>"#));
        // Blank city falls back to the slug
        assert!(html.contains(r#"<a href="/cities/toronto/"><strong>toronto</strong></a>"#));
    }

    #[test]
    fn test_toc_skips_contents_heading() {
        let toc = vec![
            TocEntry {
                level: 2,
                text: "Table of Contents".to_string(),
                id: "table-of-contents".to_string(),
            },
            TocEntry {
                level: 3,
                text: "Costs & Fees".to_string(),
                id: "costs-fees".to_string(),
            },
        ];
        let html = toc_list(&toc);
        assert!(!html.contains("#table-of-contents"));
        assert!(html.contains(r##"<li class="level-3"><a href="#costs-fees">Costs &amp; Fees</a></li>"##));
        assert_eq!(toc_list(&toc[..1]), "");
    }

    #[test]
    fn test_form_registration_lists_lead_fields() {
        let html = form_registration_page();
        assert_eq!(html.matches(r#"name="form-name""#).count(), 1);
        for field in ["city", "state", "bot-field", "name", "phone", "email"] {
            assert!(html.contains(&format!(r#"<input type="text" name="{}">"#, field)));
        }
        assert!(html.contains(r#"<textarea name="message"></textarea>"#));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(StatusCode::BAD_REQUEST, "<bad>");
        assert!(html.contains("<h1>400 Bad Request</h1>"));
        assert!(html.contains("&lt;bad&gt;"));
    }
}
