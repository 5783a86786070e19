//! Built-in shortcode catalog.
//!
//! Metadata and schemas only. Hosts attach renderers by registering their own
//! descriptors over these names.

use crate::attrs::AttrType;
use crate::registry::{ShortcodeDescriptor, ShortcodeRegistry};
use crate::validate::{AttrSpec, Schema};

/// Free-form input. Untyped, since ids and prices coerce to numbers.
fn text(description: &str) -> AttrSpec {
    AttrSpec::new().describe(description)
}

fn number(description: &str, default: f64) -> AttrSpec {
    AttrSpec::new()
        .of_type(AttrType::Number)
        .with_default(default)
        .describe(description)
}

fn select(description: &str, options: &[&str], default: &str) -> AttrSpec {
    AttrSpec::new()
        .allowed(options.iter().copied())
        .with_default(default)
        .describe(description)
}

/// Register the built-in catalog.
///
/// Existing entries with the same names are replaced.
///
/// # Example
///
/// ```
/// use shortcode_engine::{ShortcodeRegistry, register_builtins};
///
/// let mut registry = ShortcodeRegistry::new();
/// register_builtins(&mut registry);
///
/// assert!(registry.contains("gallery"));
/// assert_eq!(
///     registry.lookup("gallery").unwrap().template("gallery"),
///     r#"[gallery ids="" columns=3 size="medium"]"#
/// );
/// ```
pub fn register_builtins(registry: &mut ShortcodeRegistry) {
    registry.register(
        "cpt_list",
        ShortcodeDescriptor::new("List posts of a custom post type", "dynamic")
            .with_icon("list")
            .with_schema(
                Schema::new()
                    .require("type")
                    .attribute("type", text("Post type slug, e.g. ds_product"))
                    .attribute("count", number("Number of posts to show", 10.0))
                    .attribute(
                        "template",
                        select("Layout style", &["default", "grid", "list", "card"], "default"),
                    )
                    .attribute("columns", number("Grid columns", 3.0))
                    .attribute(
                        "orderby",
                        select("Sort field", &["date", "title", "menu_order", "rand"], "date"),
                    )
                    .attribute("order", select("Sort direction", &["ASC", "DESC"], "DESC")),
            ),
    );

    registry.register(
        "cpt_field",
        ShortcodeDescriptor::new("Show a field of a custom post", "dynamic")
            .with_icon("text-cursor")
            .with_schema(
                Schema::new()
                    .require("field")
                    .attribute("field", text("Field name: title, content, price, ..."))
                    .attribute("post_type", text("Post type slug"))
                    .attribute("post_id", text("Specific post id"))
                    .attribute(
                        "format",
                        select(
                            "Output format",
                            &["default", "currency", "date", "excerpt"],
                            "default",
                        ),
                    )
                    .attribute("default", text("Fallback value")),
            ),
    );

    registry.register(
        "acf_field",
        ShortcodeDescriptor::new("Show an ACF custom field", "dynamic")
            .with_icon("database")
            .with_schema(
                Schema::new()
                    .require("name")
                    .attribute("name", text("ACF field name"))
                    .attribute("post_id", text("Post id"))
                    .attribute(
                        "format",
                        select("Output format", &["raw", "formatted", "html"], "formatted"),
                    )
                    .attribute("type", text("Field type"))
                    .attribute("default", text("Fallback value")),
            ),
    );

    registry.register(
        "meta_field",
        ShortcodeDescriptor::new("Show a post meta value", "dynamic")
            .with_icon("key")
            .with_schema(
                Schema::new()
                    .require("key")
                    .attribute("key", text("Meta key"))
                    .attribute("post_id", text("Post id"))
                    .attribute("format", text("Output format"))
                    .attribute("default", text("Fallback value")),
            ),
    );

    registry.register(
        "gallery",
        ShortcodeDescriptor::new("Display image gallery", "media")
            .with_icon("images")
            .with_schema(
                Schema::new()
                    .require("ids")
                    .attribute("ids", text("Comma-separated image ids"))
                    .attribute("columns", number("Number of columns", 3.0))
                    .attribute(
                        "size",
                        select(
                            "Image size",
                            &["thumbnail", "medium", "large", "full"],
                            "medium",
                        ),
                    ),
            ),
    );

    registry.register(
        "embed",
        ShortcodeDescriptor::new("Embed external content", "media")
            .with_icon("play")
            .with_content()
            .with_schema(
                Schema::new()
                    .attribute("width", number("Width in pixels", 560.0))
                    .attribute("height", number("Height in pixels", 315.0)),
            ),
    );

    registry.register(
        "button",
        ShortcodeDescriptor::new("Display button with link", "layout")
            .with_icon("mouse-pointer")
            .with_content()
            .with_schema(
                Schema::new()
                    .require("url")
                    .attribute("url", text("Button URL"))
                    .attribute(
                        "style",
                        select("Button style", &["primary", "secondary", "outline"], "primary"),
                    )
                    .attribute(
                        "size",
                        select("Button size", &["small", "medium", "large"], "medium"),
                    ),
            ),
    );

    registry.register(
        "contact-form",
        ShortcodeDescriptor::new("Contact form", "forms")
            .with_icon("mail")
            .with_schema(
                Schema::new()
                    .require("id")
                    .attribute(
                        "id",
                        AttrSpec::new().of_type(AttrType::Number).describe("Form id"),
                    )
                    .attribute(
                        "subject",
                        text("Email subject").with_default("Contact Form"),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_shortcodes;
    use pretty_assertions::assert_eq;

    fn builtins() -> ShortcodeRegistry {
        let mut registry = ShortcodeRegistry::new();
        register_builtins(&mut registry);
        registry
    }

    #[test]
    fn test_catalog_contents() {
        let registry = builtins();
        let names: Vec<&str> = registry.list_all().iter().map(|(n, _)| *n).collect();

        assert_eq!(
            names,
            vec![
                "cpt_list",
                "cpt_field",
                "acf_field",
                "meta_field",
                "gallery",
                "embed",
                "button",
                "contact-form",
            ]
        );
        assert_eq!(registry.categories(), vec!["dynamic", "media", "layout", "forms"]);
        assert!(registry.list_all().iter().all(|(_, d)| d.renderer.is_none()));
    }

    #[test]
    fn test_templates() {
        let registry = builtins();
        let template = |name: &str| registry.lookup(name).unwrap().template(name);

        assert_eq!(
            template("cpt_list"),
            r#"[cpt_list type="" count=10 template="default" columns=3 orderby="date" order="DESC"]"#
        );
        assert_eq!(template("embed"), "[embed width=560 height=315][/embed]");
        assert_eq!(
            template("button"),
            r#"[button url="" style="primary" size="medium"][/button]"#
        );
        assert_eq!(
            template("contact-form"),
            r#"[contact-form id="" subject="Contact Form"]"#
        );
    }

    #[test]
    fn test_builtin_schemas_validate() {
        let registry = builtins();
        let found = scan_shortcodes(concat!(
            r#"[cpt_list type="ds_product" count="6" template="grid" columns="3"]"#,
            r#"[button url="https://example.com" style="primary" size="medium"]Click here[/button]"#,
            r#"[gallery columns=3 size=huge]"#,
        ));

        assert!(registry.validate(&found[0]).is_valid);
        assert!(registry.validate(&found[1]).is_valid);
        assert_eq!(
            registry.validate(&found[2]).errors,
            vec![
                "Missing required attribute: ids",
                "Attribute \"size\" must be one of: thumbnail, medium, large, full (got \"huge\")",
            ]
        );
    }

    #[test]
    fn test_text_attributes_accept_numbers() {
        let registry = builtins();
        let found = scan_shortcodes("[cpt_field field=price post_id=42] [contact-form id=abc]");

        assert!(registry.validate(&found[0]).is_valid);
        assert_eq!(
            registry.validate(&found[1]).errors,
            vec!["Attribute \"id\" must be of type number, got string"]
        );
    }
}
