use serde::Deserialize;
use url::{Host, Url};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteIcon {
    pub img: Option<String>,
}

/// A site as returned by the listing endpoint. Read-only once fetched.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Site {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "URL")]
    pub url: String,
    pub icon: Option<SiteIcon>,
}

impl Site {
    /// Host part of the site URL in its Unicode form. Bare hosts such as
    /// `beta.net` are accepted.
    pub fn host(&self) -> Option<String> {
        let raw = self.url.trim();
        if raw.is_empty() {
            return None;
        }
        parse_host(raw).or_else(|| parse_host(&format!("http://{raw}")))
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.icon
            .as_ref()
            .and_then(|icon| icon.img.as_deref())
            .filter(|img| !img.trim().is_empty())
    }

    /// Name when it is non-empty, otherwise the URL host.
    pub fn display_label(&self) -> Option<String> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => self.host(),
        }
    }
}

fn parse_host(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    match url.host()? {
        // The parser stores internationalized domains as punycode.
        Host::Domain(domain) => match idna::domain_to_unicode(domain) {
            (unicode, Ok(())) => Some(unicode),
            (_, Err(_)) => Some(domain.to_string()),
        },
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SitesResponse {
    #[serde(default)]
    pub sites: Vec<Site>,
}
