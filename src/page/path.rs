//! Custom page path resolution
//!
//! The path below the mount point has the shape `/<page>[/<segment>...]`.
//! The first segment names the page; the rest address a static resource
//! inside the page bundle, unless it is a single reserved entry-point name.

/// Reserved name of a page's HTML entry document.
pub const PAGE_INDEX_FILENAME: &str = "index.html";
/// Reserved name of a page's controller entry.
pub const PAGE_CONTROLLER_FILENAME: &str = "Index.groovy";
/// Reserved extension-less entry-point name.
pub const PAGE_INDEX_NAME: &str = "index";

const ENTRY_POINT_NAMES: [&str; 3] = [
    PAGE_INDEX_FILENAME,
    PAGE_CONTROLLER_FILENAME,
    PAGE_INDEX_NAME,
];

/// What a page path addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget<'a> {
    EntryPoint,
    SubResource(&'a [String]),
}

/// Page path split into decoded, non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePath {
    segments: Vec<String>,
}

impl PagePath {
    /// Split `path_info` on `/`, dropping empty segments (leading, trailing
    /// and doubled slashes) and percent-decoding the rest.
    pub fn resolve(path_info: &str) -> Self {
        let segments = path_info
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match urlencoding::decode(s) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => s.to_string(),
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn page_name(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Segments after the page name.
    pub fn sub_resource(&self) -> &[String] {
        self.segments.get(1..).unwrap_or_default()
    }

    pub fn target(&self) -> PageTarget<'_> {
        match self.sub_resource() {
            [] => PageTarget::EntryPoint,
            [only] if is_entry_point_segment(only) => PageTarget::EntryPoint,
            rest => PageTarget::SubResource(rest),
        }
    }
}

/// True for `/<page>` without a trailing slash. Such URLs are redirected so
/// that relative links inside the page resolve below the page.
pub fn needs_redirect(path_info: &str) -> bool {
    path_info
        .strip_prefix('/')
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}

/// Case-insensitive (ASCII, locale independent) match on reserved names.
pub fn is_entry_point_segment(segment: &str) -> bool {
    ENTRY_POINT_NAMES
        .iter()
        .any(|name| segment.eq_ignore_ascii_case(name))
}
