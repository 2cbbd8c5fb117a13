//! nginx server-block fragments written for a site.
//!
//! A site goes through two fragment shapes: an HTTP-only block used while the
//! certificate is being issued, then a redirect block plus an HTTPS block.

use std::fmt::Write as _;

use crate::domain::config::TemplatesConfig;
use crate::domain::site::Site;

/// HTTP-only fragment: serves the webroot so the HTTP-01 challenge can pass.
#[must_use]
pub fn http_fragment(site: &Site, templates: &TemplatesConfig) -> String {
    server_block(&site.domain, &[format!("include {};", templates.static_http)])
}

/// HTTPS fragment: plain-HTTP redirect block followed by the TLS block.
#[must_use]
pub fn https_fragment(site: &Site, templates: &TemplatesConfig) -> String {
    let redirect = server_block(&site.domain, &[format!("include {};", templates.redirect)]);
    let tls = server_block(
        &site.domain,
        &[
            format!("include {};", templates.static_https),
            format!("ssl_certificate {};", site.fullchain.display()),
            format!("ssl_certificate_key {};", site.privkey.display()),
        ],
    );
    format!("{redirect}{tls}")
}

fn server_block(domain: &str, directives: &[String]) -> String {
    let mut out = String::from("server {\n");
    let _ = writeln!(out, "    server_name {domain};");
    for directive in directives {
        let _ = writeln!(out, "    {directive}");
    }
    out.push_str("}\n");
    out
}
