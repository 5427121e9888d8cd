//! Streaming tree-walk renderer
//!
//! The core algorithm: walk a parsed template in the same depth-first
//! pre-order the part extractor used, flush literal HTML spans, strip
//! raw markers, substitute dynamic values and expand custom elements,
//! emitting `lit-part`/`lit-bindings` hydration markers as it goes.
//!
//! Everything is pull-based: nothing is computed until a chunk is
//! pulled, and recursive delegation is a child stream owned and drained
//! by its parent. A consumer that stops pulling simply abandons the
//! stream; output already delivered stands as-is.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::dom::ast::{Attribute, Node};
use crate::dom::tags::is_custom_element_name;
use crate::element::CustomElementRegistry;
use crate::error::RenderError;
use crate::parse_util::Span;
use crate::render::context::{ComponentFrame, ElementInstance, RenderContext};
use crate::render::value::Value;
use crate::template::digest::digest_for_strings;
use crate::template::parts::{AttributeKind, AttributePart, Part};
use crate::template::registry::{get_or_parse, ParsedTemplate};
use crate::template::result::TemplateResult;
use crate::template::{BOUND_ATTRIBUTE_SUFFIX, MARKER};

type Ctx = Rc<RefCell<RenderContext>>;
type Chunk = Result<String, RenderError>;

const PART_OPEN_BARE: &str = "<!--lit-part-->";
const PART_CLOSE: &str = "<!--/lit-part-->";

/// Render a value to a lazy stream of HTML text chunks.
///
/// The stream is finite, non-restartable and fused: after an error (or
/// the end) it yields nothing further. Output already pulled before an
/// error stands; nothing is retracted.
pub fn render(value: impl Into<Value>, registry: Rc<CustomElementRegistry>) -> RenderStream {
    let ctx = Rc::new(RefCell::new(RenderContext::new(registry)));
    RenderStream { inner: ValueStream::new(value.into(), ctx), failed: false }
}

/// Drain a render into a single string.
pub fn render_to_string(
    value: impl Into<Value>,
    registry: Rc<CustomElementRegistry>,
) -> Result<String, RenderError> {
    let mut out = String::new();
    for chunk in render(value, registry) {
        out.push_str(&chunk?);
    }
    Ok(out)
}

/// Lazy, fused chunk stream for one top-level render call.
pub struct RenderStream {
    inner: ValueStream,
    failed: bool,
}

impl Iterator for RenderStream {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.failed {
            return None;
        }
        match self.inner.next() {
            Some(Err(e)) => {
                self.failed = true;
                Some(Err(e))
            }
            other => other,
        }
    }
}

/// Renders one value: opening part marker, the value's own output,
/// closing part marker. The wrapping happens for every branch, even
/// empty ones, so the client can locate the exact span this value
/// produced.
struct ValueStream {
    ctx: Ctx,
    state: ValueState,
}

enum ValueState {
    /// Open marker not yet emitted.
    Open(Option<Value>),
    /// Marker emitted; branch not yet built (directives resolve here).
    Resolve(Option<Value>),
    Body(Branch),
    Close,
    Done,
}

enum Branch {
    Empty,
    Text(Option<String>),
    Template(Box<TemplateStream>),
    List { rest: std::vec::IntoIter<Value>, active: Option<Box<ValueStream>> },
}

impl ValueStream {
    fn new(value: Value, ctx: Ctx) -> Self {
        ValueStream { ctx, state: ValueState::Open(Some(value)) }
    }
}

fn branch_for(value: Value, ctx: &Ctx) -> Result<Branch, RenderError> {
    match value {
        Value::Null | Value::Nothing | Value::NoChange => Ok(Branch::Empty),
        Value::Directive(directive) => {
            let resolved = directive.resolve(&ctx.borrow())?;
            branch_for(resolved, ctx)
        }
        Value::Template(result) => {
            Ok(Branch::Template(Box::new(TemplateStream::new(result, Rc::clone(ctx))?)))
        }
        Value::List(items) => Ok(Branch::List { rest: items.into_iter(), active: None }),
        other => Ok(Branch::Text(Some(other.coerce()))),
    }
}

impl Iterator for ValueStream {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            match &mut self.state {
                ValueState::Open(slot) => {
                    let value = slot.take().unwrap_or(Value::Null);
                    let marker = match &value {
                        Value::Template(t) => {
                            format!("<!--lit-part {}-->", digest_for_strings(&t.strings))
                        }
                        _ => PART_OPEN_BARE.to_string(),
                    };
                    self.state = ValueState::Resolve(Some(value));
                    return Some(Ok(marker));
                }
                ValueState::Resolve(slot) => {
                    let value = slot.take().unwrap_or(Value::Null);
                    match branch_for(value, &self.ctx) {
                        Ok(branch) => self.state = ValueState::Body(branch),
                        Err(e) => {
                            self.state = ValueState::Done;
                            return Some(Err(e));
                        }
                    }
                }
                ValueState::Body(branch) => match branch {
                    Branch::Empty => self.state = ValueState::Close,
                    Branch::Text(text) => match text.take() {
                        Some(s) => return Some(Ok(s)),
                        None => self.state = ValueState::Close,
                    },
                    Branch::Template(template) => match template.next() {
                        Some(Ok(s)) => return Some(Ok(s)),
                        Some(Err(e)) => {
                            self.state = ValueState::Done;
                            return Some(Err(e));
                        }
                        None => self.state = ValueState::Close,
                    },
                    Branch::List { rest, active } => {
                        if let Some(child) = active {
                            match child.next() {
                                Some(Ok(s)) => return Some(Ok(s)),
                                Some(Err(e)) => {
                                    self.state = ValueState::Done;
                                    return Some(Err(e));
                                }
                                None => *active = None,
                            }
                        } else {
                            match rest.next() {
                                Some(item) => {
                                    *active = Some(Box::new(ValueStream::new(
                                        item,
                                        Rc::clone(&self.ctx),
                                    )));
                                }
                                None => self.state = ValueState::Close,
                            }
                        }
                    }
                },
                ValueState::Close => {
                    self.state = ValueState::Done;
                    return Some(Ok(PART_CLOSE.to_string()));
                }
                ValueState::Done => return None,
            }
        }
    }
}

/// Traversal work: either visit a node (addressed by its child-index
/// path from the template root) or pop the component frame pushed when
/// its element was entered.
enum Visit {
    Node(Vec<usize>),
    PopFrame,
}

/// Output queued while processing one node, drained before the
/// traversal advances.
enum Step {
    Chunk(String),
    Value(Value),
    Instance(ElementInstance),
}

/// One parsed template synchronized with its value list: the traversal
/// keeps the node index, part cursor and value cursor in lockstep with
/// the indices the extractor assigned.
struct TemplateStream {
    template: Arc<ParsedTemplate>,
    values: Vec<Value>,
    ctx: Ctx,
    /// Next dynamic value to consume.
    value_cursor: usize,
    /// Position in the precomputed part list.
    part_cursor: usize,
    /// Running depth-first pre-order node index; -1 before any node.
    node_index: isize,
    /// Last HTML byte position already emitted; `None` once the tail
    /// has been flushed.
    flush_offset: Option<usize>,
    to_visit: Vec<Visit>,
    pending: VecDeque<Step>,
    child: Option<Box<ValueStream>>,
    tail_flushed: bool,
    /// Error to surface after the already-queued tail chunk drains.
    fail: Option<RenderError>,
    done: bool,
}

impl TemplateStream {
    fn new(result: TemplateResult, ctx: Ctx) -> Result<Self, RenderError> {
        let template = get_or_parse(&result.strings)?;
        let mut to_visit = Vec::with_capacity(template.ast.len());
        for i in (0..template.ast.len()).rev() {
            to_visit.push(Visit::Node(vec![i]));
        }
        Ok(TemplateStream {
            template,
            values: result.values,
            ctx,
            value_cursor: 0,
            part_cursor: 0,
            node_index: -1,
            flush_offset: Some(0),
            to_visit,
            pending: VecDeque::new(),
            child: None,
            tail_flushed: false,
            fail: None,
            done: false,
        })
    }

    /// Emit the substring from the flush offset up to `to` and advance
    /// the offset. Fatal if the template was already fully flushed or
    /// the move goes backwards: both signal a corrupted traversal.
    fn flush_to(&mut self, to: usize) -> Result<Option<String>, RenderError> {
        let from = self
            .flush_offset
            .ok_or_else(|| RenderError::Internal("flush past end of template".into()))?;
        if to < from {
            return Err(RenderError::Internal(format!(
                "flush moved backwards ({} < {})",
                to, from
            )));
        }
        self.flush_offset = Some(to);
        Ok((to > from).then(|| self.template.html[from..to].to_string()))
    }

    /// Advance the flush offset without emitting, discarding raw marker
    /// or bound-attribute text that must not appear in output.
    fn skip_to(&mut self, to: usize) -> Result<(), RenderError> {
        let from = self
            .flush_offset
            .ok_or_else(|| RenderError::Internal("skip past end of template".into()))?;
        if to < from {
            return Err(RenderError::Internal(format!(
                "skip moved backwards ({} < {})",
                to, from
            )));
        }
        self.flush_offset = Some(to);
        Ok(())
    }

    fn take_value(&mut self) -> Result<Value, RenderError> {
        let value = self.values.get(self.value_cursor).cloned().ok_or(
            RenderError::ValueCountMismatch {
                consumed: self.value_cursor + 1,
                provided: self.values.len(),
            },
        )?;
        self.value_cursor += 1;
        Ok(value)
    }

    /// Cross-check: the extractor must have recorded a node part at
    /// exactly this traversal index.
    fn take_node_part(&mut self) -> Result<(), RenderError> {
        match self.template.parts.get(self.part_cursor) {
            Some(Part::Node(p)) if p.index as isize == self.node_index => {
                self.part_cursor += 1;
                Ok(())
            }
            _ => Err(RenderError::Internal(format!(
                "node part desynchronized at node index {}",
                self.node_index
            ))),
        }
    }

    fn take_attribute_part(&mut self, element_index: usize) -> Result<AttributePart, RenderError> {
        match self.template.parts.get(self.part_cursor) {
            Some(Part::Attribute(p)) if p.index == element_index => {
                let part = p.clone();
                self.part_cursor += 1;
                Ok(part)
            }
            _ => Err(RenderError::Internal(format!(
                "attribute part desynchronized at node index {}",
                element_index
            ))),
        }
    }

    fn visit_node(&mut self, path: &[usize]) -> Result<(), RenderError> {
        self.node_index += 1;

        enum Action {
            Literal,
            Marker(Span),
            Element { name: String, attrs: Vec<Attribute>, start_span: Span, child_count: usize },
        }

        let action = match node_at(&self.template.ast, path) {
            Some(Node::Comment(c)) if c.value == MARKER => Action::Marker(c.source_span),
            Some(Node::Element(el)) => Action::Element {
                name: el.name.clone(),
                attrs: el.attrs.clone(),
                start_span: el.start_source_span,
                child_count: el.children.len(),
            },
            Some(_) => Action::Literal,
            None => {
                return Err(RenderError::Internal(
                    "traversal path points outside the template tree".into(),
                ))
            }
        };

        match action {
            // Text and ordinary comments are part of the literal HTML
            // and flush with the surrounding span.
            Action::Literal => Ok(()),
            Action::Marker(span) => self.visit_marker_comment(span),
            Action::Element { name, attrs, start_span, child_count } => {
                self.visit_element(path, name, attrs, start_span, child_count)
            }
        }
    }

    /// A marker comment is a dynamic node slot: strip the raw marker
    /// from output and stream the next value in its place. The value's
    /// own part markers become the hydration anchor.
    fn visit_marker_comment(&mut self, span: Span) -> Result<(), RenderError> {
        if let Some(chunk) = self.flush_to(span.start)? {
            self.pending.push_back(Step::Chunk(chunk));
        }
        self.skip_to(span.end)?;
        self.take_node_part()?;
        let value = self.take_value()?;
        self.pending.push_back(Step::Value(value));
        // The client renderer creates a matching pair of open/close
        // marker comments per dynamic node slot; count the second one.
        self.node_index += 1;
        Ok(())
    }

    fn visit_element(
        &mut self,
        path: &[usize],
        name: String,
        attrs: Vec<Attribute>,
        start_span: Span,
        child_count: usize,
    ) -> Result<(), RenderError> {
        let element_index = self.node_index as usize;

        let mut instance: Option<ElementInstance> = None;
        let mut frame_pushed = false;
        if is_custom_element_name(&name) {
            let constructed = self.ctx.borrow().registry().construct(&name);
            match constructed {
                None => {} // not registered: renders as a plain element
                Some(Ok(element)) => {
                    instance = Some(Rc::new(RefCell::new(element)));
                }
                Some(Err(e)) => {
                    log::warn!(
                        "constructor for <{}> failed: {}; rendering as a plain element",
                        name,
                        e
                    );
                }
            }
            if self.ctx.borrow().registry().is_defined(&name) {
                self.ctx.borrow_mut().push_frame(ComponentFrame {
                    tag_name: name.clone(),
                    instance: instance.clone(),
                });
                frame_pushed = true;
            }
        }

        let mut has_bound_attributes = false;
        for attr in &attrs {
            if !attr.name.ends_with(BOUND_ATTRIBUTE_SUFFIX) {
                continue;
            }
            has_bound_attributes = true;
            let part = self.take_attribute_part(element_index)?;
            if let Some(chunk) = self.flush_to(attr.source_span.start)? {
                self.pending.push_back(Step::Chunk(chunk));
            }
            self.apply_attribute_part(&part, instance.as_ref(), &name)?;
            self.skip_to(attr.source_span.end)?;
        }

        if has_bound_attributes || instance.is_some() {
            // Flush through the end of the opening tag, so bound
            // attributes and component expansion both land inside the
            // element rather than before it.
            if let Some(chunk) = self.flush_to(start_span.end)? {
                self.pending.push_back(Step::Chunk(chunk));
            }
        }
        if has_bound_attributes {
            // Mark the element so the client can rebind without
            // re-scanning attribute names.
            self.pending
                .push_back(Step::Chunk(format!("<!--lit-bindings {}-->", element_index)));
        }

        if let Some(instance) = instance {
            self.pending.push_back(Step::Instance(instance));
        }

        if frame_pushed {
            self.to_visit.push(Visit::PopFrame);
        }
        for i in (0..child_count).rev() {
            let mut child_path = path.to_vec();
            child_path.push(i);
            self.to_visit.push(Visit::Node(child_path));
        }
        Ok(())
    }

    fn apply_attribute_part(
        &mut self,
        part: &AttributePart,
        instance: Option<&ElementInstance>,
        tag_name: &str,
    ) -> Result<(), RenderError> {
        match part.kind {
            AttributeKind::Property => {
                let value = if part.is_single_expression() {
                    self.take_value()?
                } else {
                    Value::Str(self.concatenate(part, false)?)
                };
                if let Some(instance) = instance {
                    instance.borrow_mut().set_property(&part.name, value.clone());
                }
                let reflected = self
                    .ctx
                    .borrow()
                    .registry()
                    .reflected_attribute(tag_name, &part.name)
                    .map(str::to_string);
                if let Some(attribute) = reflected {
                    self.pending
                        .push_back(Step::Chunk(format!(" {}=\"{}\"", attribute, value.coerce())));
                }
            }
            AttributeKind::Event => {
                // Events have no static-HTML representation; the values
                // are consumed but never emitted.
                for _ in 0..part.expression_count() {
                    self.take_value()?;
                }
            }
            AttributeKind::Boolean => {
                if !part.is_single_expression() {
                    return Err(RenderError::BooleanAttributeSyntax { name: part.name.clone() });
                }
                let value = self.take_value()?;
                if value.is_truthy() {
                    self.pending.push_back(Step::Chunk(format!(" {}", part.name)));
                }
            }
            AttributeKind::Attribute => {
                let text = self.concatenate(part, true)?;
                self.pending
                    .push_back(Step::Chunk(format!(" {}=\"{}\"", part.name, text)));
            }
        }
        Ok(())
    }

    /// Interleave the part's static fragments with its consumed values.
    /// In attribute position a directive may produce its own fragment
    /// instead of being stringified.
    fn concatenate(
        &mut self,
        part: &AttributePart,
        allow_directive_fragments: bool,
    ) -> Result<String, RenderError> {
        let mut text = String::new();
        for i in 0..part.expression_count() {
            text.push_str(&part.strings[i]);
            let value = self.take_value()?;
            let fragment = if allow_directive_fragments {
                match &value {
                    Value::Directive(d) => d.attribute_fragment(),
                    _ => None,
                }
            } else {
                None
            };
            match fragment {
                Some(f) => text.push_str(&f),
                None => text.push_str(&value.coerce()),
            }
        }
        if let Some(last) = part.strings.last() {
            text.push_str(last);
        }
        Ok(text)
    }

    /// Flush the remaining tail unconditionally, then verify the value
    /// and part cursors landed exactly at the end.
    fn finish(&mut self) -> Result<(), RenderError> {
        let from = self
            .flush_offset
            .take()
            .ok_or_else(|| RenderError::Internal("template tail already flushed".into()))?;
        if from < self.template.html.len() {
            self.pending
                .push_back(Step::Chunk(self.template.html[from..].to_string()));
        }
        if self.value_cursor != self.values.len() {
            return Err(RenderError::ValueCountMismatch {
                consumed: self.value_cursor,
                provided: self.values.len(),
            });
        }
        if self.part_cursor != self.template.parts.len() {
            return Err(RenderError::Internal(format!(
                "consumed {} of {} template parts",
                self.part_cursor,
                self.template.parts.len()
            )));
        }
        Ok(())
    }
}

impl Iterator for TemplateStream {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        loop {
            if self.done {
                return None;
            }
            if let Some(child) = &mut self.child {
                match child.next() {
                    Some(Ok(s)) => return Some(Ok(s)),
                    Some(Err(e)) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                    None => self.child = None,
                }
                continue;
            }
            if let Some(step) = self.pending.pop_front() {
                match step {
                    Step::Chunk(s) => return Some(Ok(s)),
                    Step::Value(value) => {
                        self.child =
                            Some(Box::new(ValueStream::new(value, Rc::clone(&self.ctx))));
                    }
                    Step::Instance(instance) => {
                        // Component expansion: the instance's own
                        // template result streams in place, before this
                        // element's descendants.
                        let result = instance.borrow().render();
                        self.child = Some(Box::new(ValueStream::new(
                            Value::Template(result),
                            Rc::clone(&self.ctx),
                        )));
                    }
                }
                continue;
            }
            if let Some(e) = self.fail.take() {
                self.done = true;
                return Some(Err(e));
            }
            match self.to_visit.pop() {
                Some(Visit::PopFrame) => self.ctx.borrow_mut().pop_frame(),
                Some(Visit::Node(path)) => {
                    // A failed visit may have queued literal chunks
                    // already; those drain before the error surfaces.
                    if let Err(e) = self.visit_node(&path) {
                        self.fail = Some(e);
                    }
                }
                None => {
                    if self.tail_flushed {
                        self.done = true;
                        return None;
                    }
                    self.tail_flushed = true;
                    if let Err(e) = self.finish() {
                        // The tail chunk (if any) is already queued and
                        // still flushes before the error surfaces.
                        self.fail = Some(e);
                    }
                }
            }
        }
    }
}

fn node_at<'a>(nodes: &'a [Node], path: &[usize]) -> Option<&'a Node> {
    let (&first, rest) = path.split_first()?;
    let mut node = nodes.get(first)?;
    for &i in rest {
        node = node.children().get(i)?;
    }
    Some(node)
}
