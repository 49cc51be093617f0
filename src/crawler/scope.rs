//! Link scope filtering
//!
//! Two predicates decide which discovered links the crawler follows:
//! - [`is_organization_listing`] picks organization detail links off the
//!   seed page
//! - [`resolve_in_scope`] decides whether a link on an organization page
//!   stays within that organization

use url::Url;

/// Checks if an href points at an organization detail page
///
/// True iff the href contains the organization path segment and is not
/// exactly the listing root path itself.
///
/// # Examples
///
/// ```
/// use orgmail::crawler::is_organization_listing;
///
/// assert!(is_organization_listing(
///     "/mn/organization/foo",
///     "/mn/organization",
///     "/organization/"
/// ));
///
/// // The listing root is not an organization
/// assert!(!is_organization_listing(
///     "/mn/organization",
///     "/mn/organization",
///     "/organization/"
/// ));
/// ```
pub fn is_organization_listing(href: &str, listing_path: &str, segment: &str) -> bool {
    href.contains(segment) && href != listing_path
}

/// Resolves an href against the current page and checks organization scope
///
/// The href is resolved against the page it appeared on, not the site root.
/// The resolved URL is in scope iff its string contains the site base URL
/// AND contains the organization's root URL as a substring.
///
/// This is a deliberately loose containment check, kept for compatibility
/// with the production crawl: a URL that merely embeds another
/// organization's URL in its path will also match.
///
/// # Arguments
///
/// * `page_url` - URL of the page the href appeared on
/// * `base_url` - The site's base origin string
/// * `org_url` - The organization's root URL string
/// * `href` - Raw href attribute value
///
/// # Returns
///
/// * `Some(Url)` - The resolved absolute URL, when in scope
/// * `None` - Out of scope, or the href does not resolve
pub fn resolve_in_scope(page_url: &Url, base_url: &str, org_url: &str, href: &str) -> Option<Url> {
    let resolved = page_url.join(href.trim()).ok()?;
    let resolved_str = resolved.as_str();

    if resolved_str.contains(base_url) && resolved_str.contains(org_url) {
        Some(resolved)
    } else {
        None
    }
}
