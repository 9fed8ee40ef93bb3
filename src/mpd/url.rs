//! Resolution of `BaseURL` chains and segment references.

use super::model::BaseUrl;
use url::Url;

/// Resolve `reference` against `base`.
///
/// Absolute references are returned unchanged and an empty reference yields the base itself.
/// When the base is an absolute URL, RFC 3986 resolution applies.  Manifests loaded without a
/// location often carry relative bases, and those are handled textually: the reference replaces
/// everything after the last `/` of the base, and an empty base gives a `/`-rooted path.
pub fn resolve(base: &str, reference: &str) -> String {
    if reference.is_empty() {
        return base.to_string();
    }
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    if let Ok(base_url) = Url::parse(base) {
        if let Ok(joined) = base_url.join(reference) {
            return joined.into();
        }
    }
    if reference.starts_with('/') {
        return reference.to_string();
    }
    if base.is_empty() {
        return format!("/{}", reference);
    }
    match base.rfind('/') {
        Some(pos) => format!("{}{}", &base[..=pos], reference),
        None => reference.to_string(),
    }
}

/// Combine the first `BaseURL` of each level, outermost level first.  Levels without a `BaseURL`
/// contribute nothing; an empty result means no level declared one.
pub fn base_url_chain<'a>(levels: impl IntoIterator<Item = &'a [BaseUrl]>) -> String {
    levels
        .into_iter()
        .filter_map(|urls| urls.first())
        .fold(String::new(), |acc, base| {
            if acc.is_empty() {
                base.url.clone()
            } else {
                resolve(&acc, &base.url)
            }
        })
}

#[cfg(test)]
mod test {
    use super::*;

    fn base(url: &str) -> Vec<BaseUrl> {
        vec![BaseUrl {
            url: url.to_string(),
            ..BaseUrl::default()
        }]
    }

    #[test]
    fn absolute_base() {
        assert_eq!(
            resolve("http://example.com/a/b.mpd", "seg/1.m4s"),
            "http://example.com/a/seg/1.m4s"
        );
        assert_eq!(
            resolve("http://example.com/a/", "/root.m4s"),
            "http://example.com/root.m4s"
        );
        assert_eq!(
            resolve("http://example.com/a/", "../up.m4s"),
            "http://example.com/up.m4s"
        );
    }

    #[test]
    fn absolute_reference() {
        assert_eq!(
            resolve("http://example.com/", "https://cdn.example.net/x.m4s"),
            "https://cdn.example.net/x.m4s"
        );
        assert_eq!(
            resolve("", "https://cdn.example.net/x.m4s"),
            "https://cdn.example.net/x.m4s"
        );
    }

    #[test]
    fn empty_parts() {
        assert_eq!(resolve("", "TestMedia"), "/TestMedia");
        assert_eq!(resolve("http://example.com/", ""), "http://example.com/");
        assert_eq!(resolve("", ""), "");
    }

    #[test]
    fn relative_base() {
        assert_eq!(resolve("dir/sub/", "x.m4s"), "dir/sub/x.m4s");
        assert_eq!(resolve("dir/file", "x.m4s"), "dir/x.m4s");
        assert_eq!(resolve("file", "x.m4s"), "x.m4s");
        assert_eq!(resolve("dir/", "/x.m4s"), "/x.m4s");
    }

    #[test]
    fn chain() {
        let mpd = base("http://example.com/");
        let period = base("period/");
        let none = vec![];
        let rep = base("rep/");
        assert_eq!(
            base_url_chain([&mpd[..], &period[..], &none[..], &rep[..]]),
            "http://example.com/period/rep/"
        );
        assert_eq!(base_url_chain([&none[..], &period[..]]), "period/");
        assert_eq!(base_url_chain([&none[..]]), "");
    }

    #[test]
    fn chain_uses_first_base_url() {
        let mut urls = base("http://a.example/");
        urls.extend(base("http://b.example/"));
        assert_eq!(base_url_chain([&urls[..]]), "http://a.example/");
    }
}
