//! Best-effort rewrite of upstream article HTML for embedding.
//!
//! This is a regex pass, not a parser. Anything the patterns do not recognise is
//! copied through untouched, so malformed markup never fails a request.

use super::image::absolutize;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<img\b[^>]*?\ssrc=["'])([^"']+)(["'])"#).expect("valid img src pattern")
});

static A_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(<a\b[^>]*?\shref=["'])([^"']+)(["'])"#).expect("valid anchor href pattern")
});

static FIGURE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<figure\b[^>]*>.*?</figure>").expect("valid figure pattern")
});

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").expect("valid anchor pattern"));

static IMAGE_UNIT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)class=["'][^"']*box_image__unit[^"']*["']"#).expect("valid class pattern")
});

static IMG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<img\b").expect("valid img pattern"));

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b([^>]*?)(/?)>").expect("valid img tag pattern"));

/// Quote-aware so the injected handler (which contains single quotes) is removed whole.
static GUARD_ATTRS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s(?:oncontextmenu|onmousedown)\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("valid guard attribute pattern")
});

#[derive(Debug, Clone)]
pub struct HtmlRewriter {
    guard_attrs: String,
}

impl HtmlRewriter {
    /// `notice` is shown in the alert raised by the context-menu handler.
    pub fn new(notice: &str) -> Self {
        let escaped = notice
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('"', "&quot;");
        Self {
            guard_attrs: format!(
                r#" oncontextmenu="alert('{escaped}');return false;" onmousedown="return false;""#
            ),
        }
    }

    pub fn rewrite(&self, html: &str, base: Option<&Url>) -> String {
        if html.is_empty() {
            return String::new();
        }

        let out = absolutize_attr(&IMG_SRC, html, base);
        let out = absolutize_attr(&A_HREF, &out, base);
        let out = downgrade_figure_links(&out);
        let out = downgrade_image_unit_links(&out);
        self.guard_images(&out)
    }

    fn guard_images(&self, html: &str) -> String {
        IMG_TAG
            .replace_all(html, |caps: &Captures| {
                let cleaned = GUARD_ATTRS.replace_all(&caps[1], "");
                format!("<img{}{}{}>", cleaned.trim_end(), self.guard_attrs, &caps[2])
            })
            .into_owned()
    }
}

fn absolutize_attr(pattern: &Regex, html: &str, base: Option<&Url>) -> String {
    pattern
        .replace_all(html, |caps: &Captures| {
            format!("{}{}{}", &caps[1], absolutize(&caps[2], base), &caps[3])
        })
        .into_owned()
}

/// Inside `<figure>` blocks, anchors that wrap an image become spans.
fn downgrade_figure_links(html: &str) -> String {
    FIGURE_BLOCK
        .replace_all(html, |block: &Captures| {
            ANCHOR
                .replace_all(&block[0], |caps: &Captures| downgrade_if_image(caps))
                .into_owned()
        })
        .into_owned()
}

/// Anywhere in the body, `box_image__unit` anchors that wrap an image become spans.
fn downgrade_image_unit_links(html: &str) -> String {
    ANCHOR
        .replace_all(html, |caps: &Captures| {
            if IMAGE_UNIT_CLASS.is_match(&caps[1]) {
                downgrade_if_image(caps)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn downgrade_if_image(caps: &Captures) -> String {
    if IMG_OPEN.is_match(&caps[2]) {
        format!("<span{}>{}</span>", &caps[1], &caps[2])
    } else {
        caps[0].to_string()
    }
}
