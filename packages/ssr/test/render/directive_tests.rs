/**
 * Directive protocol tests
 *
 * Capability dispatch for non-plain binding values: node-position
 * expansion, attribute-position fragments and render-context access.
 */

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use lit_ssr::render::RenderContext;
    use lit_ssr::{
        class_map, html, render_to_string, repeat, CustomElement, CustomElementRegistry,
        Directive, RenderError, TemplateResult, Value,
    };

    fn registry() -> Rc<CustomElementRegistry> {
        Rc::new(CustomElementRegistry::new())
    }

    mod repeat_directive {
        use super::*;

        #[test]
        fn should_render_each_mapped_item_in_its_own_part() {
            let items = repeat(["a", "b"], |item, _| Value::from(format!("[{}]", item)));
            let out = render_to_string(
                html!("<ul>" {items} "</ul>"),
                registry(),
            )
            .unwrap();
            assert!(out.contains(
                "<!--lit-part-->[a]<!--/lit-part--><!--lit-part-->[b]<!--/lit-part-->"
            ));
        }

        #[test]
        fn should_pass_the_item_index_to_the_template() {
            let items = repeat(["x", "y", "z"], |item, i| Value::from(format!("{}:{}", i, item)));
            let out = render_to_string(html!("<ol>" {items} "</ol>"), registry()).unwrap();
            for expected in ["0:x", "1:y", "2:z"] {
                assert!(out.contains(expected), "missing {} in {}", expected, out);
            }
        }

        #[test]
        fn should_render_template_results_per_item() {
            let items = repeat([1, 2], |n, _| Value::from(html!("<li>" {*n} "</li>")));
            let out = render_to_string(html!("<ul>" {items} "</ul>"), registry()).unwrap();
            assert!(out.contains("<li><!--lit-part-->1<!--/lit-part--></li>"));
            assert!(out.contains("<li><!--lit-part-->2<!--/lit-part--></li>"));
        }

        #[test]
        fn should_render_nothing_for_an_empty_sequence() {
            let items = repeat(Vec::<&str>::new(), |item, _| Value::from(*item));
            let out = render_to_string(html!("<ul>" {items} "</ul>"), registry()).unwrap();
            assert!(out.contains("<ul><!--lit-part--><!--/lit-part--></ul>"));
        }
    }

    mod class_map_directive {
        use super::*;

        #[test]
        fn should_join_truthy_class_names_in_order() {
            let classes = class_map([("one", true), ("two", false), ("three", true)]);
            let out = render_to_string(
                html!("<div class=\"base " {classes} "\"></div>"),
                registry(),
            )
            .unwrap();
            assert!(out.contains("<div class=\"base one three\">"), "got {}", out);
        }

        #[test]
        fn should_produce_an_empty_fragment_when_nothing_is_enabled() {
            let classes = class_map([("one", false)]);
            let out = render_to_string(
                html!("<div class=\"" {classes} "\"></div>"),
                registry(),
            )
            .unwrap();
            assert!(out.contains("<div class=\"\">"), "got {}", out);
        }

        #[test]
        fn should_fail_in_node_position() {
            let classes = class_map([("one", true)]);
            let err = render_to_string(html!("<p>" {classes} "</p>"), registry()).unwrap_err();
            assert!(matches!(err, RenderError::Directive(_)));
        }
    }

    mod custom_directives {
        use super::*;
        use pretty_assertions::assert_eq;

        /// Resolves to the tag name of the nearest enclosing custom
        /// element, exercising context access during expansion.
        struct HostTag;

        impl Directive for HostTag {
            fn kind(&self) -> &'static str {
                "host_tag"
            }

            fn resolve(&self, ctx: &RenderContext) -> Result<Value, RenderError> {
                let tag = ctx
                    .enclosing_element()
                    .map(|frame| frame.tag_name.clone())
                    .unwrap_or_default();
                Ok(Value::Str(tag))
            }
        }

        struct XHost;

        impl CustomElement for XHost {
            fn set_property(&mut self, _name: &str, _value: Value) {}

            fn render(&self) -> TemplateResult {
                let host: Rc<dyn Directive> = Rc::new(HostTag);
                html!("<span>" {host} "</span>")
            }
        }

        #[test]
        fn should_expose_the_enclosing_element_during_expansion() {
            let mut registry = CustomElementRegistry::new();
            registry.define("x-host", || Ok(Box::new(XHost)));
            let out = render_to_string(html!("<x-host></x-host>"), Rc::new(registry)).unwrap();
            assert!(
                out.contains("<span><!--lit-part-->x-host<!--/lit-part--></span>"),
                "got {}",
                out
            );
        }

        #[test]
        fn should_see_no_enclosing_element_at_top_level() {
            let host: Rc<dyn Directive> = Rc::new(HostTag);
            let out = render_to_string(html!("<p>" {host} "</p>"), registry()).unwrap();
            assert!(out.contains("<p><!--lit-part--><!--/lit-part--></p>"), "got {}", out);
        }

        /// Resolves to a nested template result.
        struct Banner;

        impl Directive for Banner {
            fn kind(&self) -> &'static str {
                "banner"
            }

            fn resolve(&self, _ctx: &RenderContext) -> Result<Value, RenderError> {
                Ok(Value::from(html!("<strong>" {"!"} "</strong>")))
            }
        }

        #[test]
        fn should_not_resolve_until_its_chunk_is_pulled() {
            use std::cell::Cell;

            struct Probe {
                resolved: Rc<Cell<usize>>,
            }

            impl Directive for Probe {
                fn kind(&self) -> &'static str {
                    "probe"
                }

                fn resolve(&self, _ctx: &RenderContext) -> Result<Value, RenderError> {
                    self.resolved.set(self.resolved.get() + 1);
                    Ok(Value::from("x"))
                }
            }

            let resolved = Rc::new(Cell::new(0));
            let probe: Rc<dyn Directive> = Rc::new(Probe { resolved: Rc::clone(&resolved) });
            let mut stream = lit_ssr::render(html!("<p>" {probe} "</p>"), registry());

            // Opening marker and leading HTML flush before the
            // directive's slot is reached.
            stream.next().unwrap().unwrap();
            stream.next().unwrap().unwrap();
            assert_eq!(resolved.get(), 0);

            let rest: Vec<String> = stream.collect::<Result<_, _>>().unwrap();
            assert_eq!(resolved.get(), 1);
            assert!(rest.concat().contains("<!--lit-part-->x<!--/lit-part-->"));
        }

        #[test]
        fn should_render_a_directive_resolving_to_a_template() {
            let banner: Rc<dyn Directive> = Rc::new(Banner);
            let out = render_to_string(html!("<p>" {banner} "</p>"), registry()).unwrap();
            assert!(
                out.contains("<strong><!--lit-part-->!<!--/lit-part--></strong>"),
                "got {}",
                out
            );
        }
    }
}
