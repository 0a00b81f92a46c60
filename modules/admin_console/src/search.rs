//! Search term carried in the page URL so a listing can be bookmarked.

use url::Url;

/// Value of `param`, or empty when absent.
pub fn read_search(location: &Url, param: &str) -> String {
    location
        .query_pairs()
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

/// Replace `param` with `term`; an empty term removes it. Other parameters are kept.
pub fn write_search(location: &mut Url, param: &str, term: &str) {
    let kept: Vec<(String, String)> = location
        .query_pairs()
        .filter(|(k, _)| k != param)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() && term.is_empty() {
        location.set_query(None);
        return;
    }

    let mut pairs = location.query_pairs_mut();
    pairs.clear();
    for (k, v) in &kept {
        pairs.append_pair(k, v);
    }
    if !term.is_empty() {
        pairs.append_pair(param, term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_decoded_term() {
        let url = Url::parse("http://admin.local/users?query=ann%20lee&tab=2").unwrap();
        assert_eq!(read_search(&url, "query"), "ann lee");
        assert_eq!(read_search(&url, "search"), "");
    }

    #[test]
    fn writes_and_clears_the_term() {
        let mut url = Url::parse("http://admin.local/users?tab=2").unwrap();
        write_search(&mut url, "query", "50% off");
        assert_eq!(read_search(&url, "query"), "50% off");
        assert_eq!(read_search(&url, "tab"), "2");

        write_search(&mut url, "query", "bob");
        assert_eq!(url.query(), Some("tab=2&query=bob"));

        write_search(&mut url, "query", "");
        assert_eq!(url.query(), Some("tab=2"));

        let mut bare = Url::parse("http://admin.local/users?query=x").unwrap();
        write_search(&mut bare, "query", "");
        assert_eq!(bare.as_str(), "http://admin.local/users");
    }
}
