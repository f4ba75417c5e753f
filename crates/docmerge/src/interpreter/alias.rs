//! Item alias derivation for loops.

use cruet::string::singularize::to_singular;

use crate::options::RenderOptions;

/// The name bound to each item inside `{{#each collection}}`.
///
/// Uses the last segment of the collection path. An override from
/// [`RenderOptions`] wins; otherwise the segment is singularized with English
/// inflection rules (`projects` → `project`, `jobs` → `job`,
/// `categories` → `category`). Names that do not change under
/// singularization (`staff`) are their own alias.
///
/// ```
/// use docmerge::RenderOptions;
/// use docmerge::interpreter::item_alias;
///
/// let options = RenderOptions::default();
/// assert_eq!(item_alias("projects", &options), "project");
/// assert_eq!(item_alias("invoice.materials", &options), "material");
/// assert_eq!(item_alias("jobs", &options.with_alias("jobs", "task")), "task");
/// ```
pub fn item_alias(collection: &str, options: &RenderOptions) -> String {
    let name = collection.rsplit('.').next().unwrap_or(collection);
    match options.alias_override(name) {
        Some(alias) => alias.to_string(),
        None => to_singular(name),
    }
}
