//! # Initial Document Builder
//!
//! Builds the deterministic welcome document used when a local session
//! starts without persisted state.
//!
//! The builder composes node operations directly rather than parsing a
//! markup blob, keeping the node model the single source of truth at
//! bootstrap time. It performs only structural construction, no I/O, and
//! cannot fail.

use inkstone_model::{BlockNode, DocumentRoot, InlineNode, ListItem, ListKind, TextFormat, TextNode};

/// Community chat invite surfaced in the welcome document.
pub const COMMUNITY_INVITE_URL: &str = "https://discord.com/invite/KmG4wQnnD9";

const WEBSITE_URL: &str = "https://inkstone-editor.dev/";
const REPOSITORY_URL: &str = "https://github.com/inkstone-editor/inkstone";
const COMPOSER_URL: &str = "https://github.com/inkstone-editor/inkstone/tree/main/packages/composer";

/// Populate an empty root with the fixed welcome content.
///
/// The engine may re-run default-state initialization across remounts, so
/// emptiness is re-checked here rather than trusted from the caller: a
/// non-empty root is left untouched.
pub fn populate_welcome_document(root: &mut DocumentRoot) {
    if !root.is_empty() {
        return;
    }

    root.append(BlockNode::heading(
        1,
        vec![InlineNode::text("Welcome to Inkstone")],
    ));

    root.append(BlockNode::quote(vec![InlineNode::text(
        "In case you were wondering what the panel at the bottom is - it's the debug view, \
         showing the current state of the editor. You can disable it from the settings \
         control in the bottom-left of your screen.",
    )]));

    root.append(BlockNode::paragraph(vec![
        InlineNode::text("This surface is a demo environment built with "),
        InlineNode::formatted("inkstone-composer", TextFormat::CODE),
        InlineNode::text("."),
        InlineNode::text(" Try typing in "),
        InlineNode::formatted("some text", TextFormat::BOLD),
        InlineNode::text(" with "),
        InlineNode::formatted("different", TextFormat::ITALIC),
        InlineNode::text(" formats."),
    ]));

    root.append(BlockNode::paragraph(vec![InlineNode::text(
        "Make sure to check out the various plugins in the toolbar. You can also use \
         #hashtags or @-mentions too!",
    )]));

    root.append(BlockNode::list(
        ListKind::Bullet,
        vec![
            ListItem::new(vec![
                InlineNode::text("Visit the "),
                InlineNode::link(WEBSITE_URL, vec![TextNode::new("Inkstone website")]),
                InlineNode::text(" for documentation and more information."),
            ]),
            ListItem::new(vec![
                InlineNode::text("Check out the code on our "),
                InlineNode::link(REPOSITORY_URL, vec![TextNode::new("GitHub repository")]),
                InlineNode::text("."),
            ]),
            ListItem::new(vec![
                InlineNode::text("The composition layer's code can be found "),
                InlineNode::link(COMPOSER_URL, vec![TextNode::new("here")]),
                InlineNode::text("."),
            ]),
            ListItem::new(vec![
                InlineNode::text("Join our "),
                InlineNode::link(COMMUNITY_INVITE_URL, vec![TextNode::new("Discord Server")]),
                InlineNode::text(" and chat with the team."),
            ]),
        ],
    ));

    root.append(BlockNode::paragraph(vec![InlineNode::text(
        "Lastly, we're constantly adding cool new features. So make sure you check back \
         here when you next get a chance :).",
    )]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_model::NodeKind;

    #[test]
    fn test_welcome_document_shape() {
        let mut root = DocumentRoot::new();
        populate_welcome_document(&mut root);

        let kinds: Vec<NodeKind> = root.children.iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Heading,
                NodeKind::Quote,
                NodeKind::Paragraph,
                NodeKind::Paragraph,
                NodeKind::List,
                NodeKind::Paragraph,
            ]
        );

        match &root.children[4] {
            BlockNode::List { kind, items } => {
                assert_eq!(*kind, ListKind::Bullet);
                assert_eq!(items.len(), 4);

                // The 4th item carries the community invite link
                let link_url = items[3].children.iter().find_map(|inline| match inline {
                    InlineNode::Link { url, .. } => Some(url.as_str()),
                    _ => None,
                });
                assert_eq!(link_url, Some(COMMUNITY_INVITE_URL));
            }
            other => panic!("expected list, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_populating_non_empty_root_is_a_no_op() {
        let mut root = DocumentRoot::new();
        root.append(BlockNode::paragraph(vec![InlineNode::text("existing")]));
        let before = root.clone();

        populate_welcome_document(&mut root);
        assert_eq!(root, before);
    }

    #[test]
    fn test_formatted_runs_present() {
        let mut root = DocumentRoot::new();
        populate_welcome_document(&mut root);

        let code_run = root.resolve_text(&[2, 1]).unwrap();
        assert!(code_run.format.contains(TextFormat::CODE));

        let bold_run = root.resolve_text(&[2, 4]).unwrap();
        assert!(bold_run.format.contains(TextFormat::BOLD));
        assert_eq!(bold_run.content, "some text");
    }
}
