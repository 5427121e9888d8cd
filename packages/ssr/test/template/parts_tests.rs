/**
 * Part extraction tests
 *
 * Depth-first pre-order indexing of dynamic slots, matched against the
 * traversal the renderer performs on the same tree.
 */

#[cfg(test)]
mod tests {
    use lit_ssr::dom::parse;
    use lit_ssr::template::parts::{classify_attribute, extract_parts};
    use lit_ssr::template::{
        get_template_html, AttributeKind, Part, TemplateStrings,
    };

    fn parts_for(strings: &[&str]) -> Vec<Part> {
        let html = get_template_html(&TemplateStrings::from_slice(strings));
        let parsed = parse(&html);
        assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);
        extract_parts(&parsed.root_nodes)
    }

    mod node_parts {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_index_a_marker_after_its_preceding_nodes() {
            // <p>(0) text(1) marker(2)
            let parts = parts_for(&["<p>Hello, ", "!</p>"]);
            assert_eq!(parts.len(), 1);
            assert_eq!(parts[0].index(), 2);
        }

        #[test]
        fn should_double_increment_at_each_marker() {
            // <div>(0) marker(1, then 2) marker(3)
            let parts = parts_for(&["<div>", "", "</div>"]);
            let indices: Vec<usize> = parts.iter().map(Part::index).collect();
            assert_eq!(indices, vec![1, 3]);
        }

        #[test]
        fn should_index_across_siblings_and_depth() {
            // <div>(0) <span>(1) marker(2,3) </span> marker(4)
            let parts = parts_for(&["<div><span>", "</span>", "</div>"]);
            let indices: Vec<usize> = parts.iter().map(Part::index).collect();
            assert_eq!(indices, vec![2, 4]);
        }

        #[test]
        fn should_not_index_ordinary_comments_as_parts() {
            let parts = parts_for(&["<div><!-- note -->", "</div>"]);
            assert_eq!(parts.len(), 1);
            // <div>(0) comment(1) marker(2)
            assert_eq!(parts[0].index(), 2);
        }
    }

    mod attribute_parts {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_attach_to_the_owning_elements_index() {
            // <div>(0) <span>(1) marker(2)
            let parts = parts_for(&["<div class=\"", "\"><span>", "</span></div>"]);
            assert_eq!(parts.len(), 2);
            match &parts[0] {
                Part::Attribute(p) => {
                    assert_eq!(p.index, 0);
                    assert_eq!(p.name, "class");
                    assert_eq!(p.kind, AttributeKind::Attribute);
                }
                other => panic!("expected an attribute part, got {:?}", other),
            }
            assert_eq!(parts[1].index(), 2);
        }

        #[test]
        fn should_classify_binding_kinds_by_sigil() {
            let parts = parts_for(&[
                "<x-foo .bar=", " @click=", " ?hidden=", " title=\"", "\"></x-foo>",
            ]);
            let kinds: Vec<(String, AttributeKind)> = parts
                .iter()
                .map(|p| match p {
                    Part::Attribute(a) => (a.name.clone(), a.kind),
                    other => panic!("expected an attribute part, got {:?}", other),
                })
                .collect();
            assert_eq!(
                kinds,
                vec![
                    ("bar".to_string(), AttributeKind::Property),
                    ("click".to_string(), AttributeKind::Event),
                    ("hidden".to_string(), AttributeKind::Boolean),
                    ("title".to_string(), AttributeKind::Attribute),
                ]
            );
        }

        #[test]
        fn should_split_the_raw_value_on_embedded_markers() {
            let parts = parts_for(&["<div class=\"a ", " b ", " c\"></div>"]);
            match &parts[0] {
                Part::Attribute(p) => {
                    assert_eq!(p.strings.as_slice(), ["a ", " b ", " c"]);
                    assert_eq!(p.expression_count(), 2);
                    assert!(!p.is_single_expression());
                }
                other => panic!("expected an attribute part, got {:?}", other),
            }
        }

        #[test]
        fn should_detect_single_whole_value_expressions() {
            let parts = parts_for(&["<input ?disabled=", ">"]);
            match &parts[0] {
                Part::Attribute(p) => {
                    assert_eq!(p.strings.as_slice(), ["", ""]);
                    assert!(p.is_single_expression());
                }
                other => panic!("expected an attribute part, got {:?}", other),
            }
        }
    }

    mod classification {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_strip_the_sigil_from_the_logical_name() {
            assert_eq!(classify_attribute(".value"), (AttributeKind::Property, "value"));
            assert_eq!(classify_attribute("@input"), (AttributeKind::Event, "input"));
            assert_eq!(classify_attribute("?checked"), (AttributeKind::Boolean, "checked"));
            assert_eq!(classify_attribute("href"), (AttributeKind::Attribute, "href"));
        }
    }

    mod determinism {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_extract_identical_parts_on_repeated_runs() {
            let strings = TemplateStrings::from_slice(&["<ul><li>", "</li><li>", "</li></ul>"]);
            let html = get_template_html(&strings);
            let parsed = parse(&html);
            let first = extract_parts(&parsed.root_nodes);
            let second = extract_parts(&parsed.root_nodes);
            assert_eq!(first, second);
        }
    }
}
