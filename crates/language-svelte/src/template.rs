//! Component scanner.
//!
//! Walks a component once and generates a single JavaScript program that
//! a regular scope analysis can bind: both scripts are copied verbatim in
//! document order, template expressions become expression statements and
//! template constructs that introduce names become functions or blocks:
//!
//! | template                         | generated                         |
//! |----------------------------------|-----------------------------------|
//! | `{expr}`                         | `(expr);`                         |
//! | `{#if a}..{:else if b}..{/if}`   | `if (a) {..} else if (b) {..}`    |
//! | `{#each xs as x, i (k)}..{/each}`| `(xs); ((x, i) => { (k); .. });`  |
//! | `{#await p then v}..{/await}`    | `(p); ((v) => { .. });`           |
//! | `{#key k}..{/key}`               | `(k); { .. }`                     |
//! | `{#snippet s(a)}..{/snippet}`    | `function s(a) { .. }`            |
//! | `{@const a = b}`                 | `const a = b;`                    |
//! | `<Cmp let:x>..</Cmp>`            | `(Cmp); ((x) => { .. }); (Cmp);`  |
//! | `<div use:action transition:t>`  | `(action); (t);`                  |

use crate::error::SvelteError;
use crate::program::SyntheticProgram;
use language_core::ByteRange;

/// A scanned component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub program: SyntheticProgram,
    /// Content of `<script context="module">`
    pub module_script: Option<ByteRange>,
    /// Content of the instance script
    pub instance_script: Option<ByteRange>,
    /// A script declares `lang="ts"`
    pub typescript: bool,
}

/// Scan `source` into a [`Component`].
pub fn scan_component(source: &str) -> Result<Component, SvelteError> {
    let mut scanner = Scanner::new(source);
    scanner.run()?;
    Ok(Component {
        program: scanner.out,
        module_script: scanner.module_script,
        instance_script: scanner.instance_script,
        typescript: scanner.typescript,
    })
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Synthetic parameter for `{#each}` blocks without an item pattern.
const ANONYMOUS_ITEM: &str = "$$item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    If,
    Each,
    Await,
    Key,
    Snippet,
}

impl BlockKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "if" => Some(BlockKind::If),
            "each" => Some(BlockKind::Each),
            "await" => Some(BlockKind::Await),
            "key" => Some(BlockKind::Key),
            "snippet" => Some(BlockKind::Snippet),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::Each => "each",
            BlockKind::Await => "await",
            BlockKind::Key => "key",
            BlockKind::Snippet => "snippet",
        }
    }
}

#[derive(Debug)]
struct Block {
    kind: BlockKind,
    start: usize,
    /// Code that closes the current branch
    closer: &'static str,
    /// Open elements when the block started
    elements: usize,
}

#[derive(Debug)]
struct Element {
    name: String,
    /// Children are wrapped in a function for `let:` directives
    wrapped: bool,
}

#[derive(Debug)]
enum AttributeValue {
    None,
    Expression(ByteRange),
    /// Quoted text with embedded `{expr}` parts
    Text(Vec<ByteRange>),
}

struct Scanner<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    out: SyntheticProgram,
    blocks: Vec<Block>,
    elements: Vec<Element>,
    module_script: Option<ByteRange>,
    instance_script: Option<ByteRange>,
    typescript: bool,
}

impl<'s> Scanner<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            out: SyntheticProgram::new(),
            blocks: Vec::new(),
            elements: Vec::new(),
            module_script: None,
            instance_script: None,
            typescript: false,
        }
    }

    fn run(&mut self) -> Result<(), SvelteError> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'<' => self.scan_angle()?,
                b'{' => self.scan_mustache()?,
                _ => self.pos += 1,
            }
        }
        if let Some(block) = self.blocks.last() {
            return Err(SvelteError::template(
                format!("Block {{#{}}} was left open", block.kind.keyword()),
                block.start,
            ));
        }
        self.close_elements(0);
        Ok(())
    }

    // --- markup ---

    fn scan_angle(&mut self) -> Result<(), SvelteError> {
        let src = self.src;
        let rest = &src[self.pos..];
        if rest.starts_with("<!--") {
            let end = rest
                .find("-->")
                .ok_or_else(|| SvelteError::template("Unclosed comment", self.pos))?;
            self.pos += end + 3;
        } else if rest.starts_with("<!") {
            self.pos = self.find_byte(b'>', self.pos).map_or(self.bytes.len(), |i| i + 1);
        } else if rest.starts_with("</") {
            if self.bytes.get(self.pos + 2).is_some_and(u8::is_ascii_alphabetic) {
                self.scan_closing_tag()?;
            } else {
                self.pos += 2;
            }
        } else if self.bytes.get(self.pos + 1).is_some_and(u8::is_ascii_alphabetic) {
            if self.tag_named("script") {
                self.scan_script()?;
            } else if self.tag_named("style") {
                self.skip_raw_element("style")?;
            } else {
                self.scan_tag()?;
            }
        } else {
            self.pos += 1;
        }
        Ok(())
    }

    fn tag_named(&self, name: &str) -> bool {
        let rest = &self.src[self.pos + 1..];
        rest.starts_with(name)
            && rest[name.len()..]
                .bytes()
                .next()
                .map_or(true, |b| b.is_ascii_whitespace() || b == b'>' || b == b'/')
    }

    fn scan_script(&mut self) -> Result<(), SvelteError> {
        let src = self.src;
        let start = self.pos;
        let open_end = self
            .find_byte(b'>', start)
            .ok_or_else(|| SvelteError::template("Unclosed <script> tag", start))?;
        let attributes = &src[start + "<script".len()..open_end];
        let content_start = open_end + 1;
        let content_end = self.src[content_start..]
            .find("</script")
            .map(|i| content_start + i)
            .ok_or_else(|| SvelteError::template("<script> must have a closing tag", start))?;

        let content = ByteRange::new(content_start as u32, content_end as u32);
        if is_module_script(attributes) {
            self.module_script = Some(content);
        } else {
            self.instance_script = Some(content);
        }
        if is_typescript(attributes) {
            self.typescript = true;
        }

        self.out.push_source(self.src, content);
        self.out.push("\n;\n");
        self.pos = self
            .find_byte(b'>', content_end)
            .map_or(self.bytes.len(), |i| i + 1);
        Ok(())
    }

    fn skip_raw_element(&mut self, name: &str) -> Result<(), SvelteError> {
        let closing = format!("</{name}");
        let end = self.src[self.pos..]
            .find(&closing)
            .ok_or_else(|| SvelteError::template(format!("<{name}> must have a closing tag"), self.pos))?;
        let end = self.pos + end;
        self.pos = self.find_byte(b'>', end).map_or(self.bytes.len(), |i| i + 1);
        Ok(())
    }

    fn scan_tag(&mut self) -> Result<(), SvelteError> {
        let start = self.pos;
        let src = self.src;
        let name = self.scan_name(start + 1);
        let name_text = &src[name.start as usize..name.end as usize];
        self.pos = name.end as usize;

        let mut expressions = Vec::new();
        let mut slot_params = Vec::new();
        let self_closing = loop {
            self.skip_whitespace();
            let Some(&b) = self.bytes.get(self.pos) else {
                return Err(SvelteError::template(format!("Unclosed tag <{name_text}>"), start));
            };
            match b {
                b'>' => {
                    self.pos += 1;
                    break false;
                }
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'>') => {
                    self.pos += 2;
                    break true;
                }
                b'{' => {
                    let close = self.closing_brace(self.pos)?;
                    let content = self.trimmed(self.pos + 1, close);
                    let spread = &self.src[content.start as usize..content.end as usize];
                    if let Some(stripped) = spread.strip_prefix("...") {
                        let offset = (spread.len() - stripped.len()) as u32;
                        expressions.push(ByteRange::new(content.start + offset, content.end));
                    } else {
                        expressions.push(content);
                    }
                    self.pos = close + 1;
                }
                _ => self.scan_attribute(&mut expressions, &mut slot_params)?,
            }
        };

        if is_component(name_text) {
            self.emit_expression(name);
        }
        for expression in expressions {
            self.emit_expression(expression);
        }
        let wrapped = !slot_params.is_empty();
        if wrapped {
            self.out.push("((");
            for (i, param) in slot_params.iter().enumerate() {
                if i > 0 {
                    self.out.push(", ");
                }
                self.out.push_source(self.src, *param);
            }
            self.out.push(") => {\n");
        }

        let void = VOID_ELEMENTS.contains(&name_text.to_ascii_lowercase().as_str());
        if self_closing || void {
            if wrapped {
                self.out.push("});\n");
            }
        } else {
            self.elements.push(Element {
                name: name_text.to_string(),
                wrapped,
            });
        }
        Ok(())
    }

    fn scan_attribute(
        &mut self,
        expressions: &mut Vec<ByteRange>,
        slot_params: &mut Vec<ByteRange>,
    ) -> Result<(), SvelteError> {
        let src = self.src;
        let name_start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace()
                || b == b'='
                || b == b'>'
                || (b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>'))
            {
                break;
            }
            self.pos += 1;
        }
        let name = &src[name_start..self.pos];

        self.skip_whitespace();
        let value = if self.bytes.get(self.pos) == Some(&b'=') {
            self.pos += 1;
            self.skip_whitespace();
            self.scan_attribute_value()?
        } else {
            AttributeValue::None
        };

        let value_expressions = match &value {
            AttributeValue::None => Vec::new(),
            AttributeValue::Expression(range) => vec![*range],
            AttributeValue::Text(ranges) => ranges.clone(),
        };

        let Some(colon) = name.find(':') else {
            expressions.extend(value_expressions);
            return Ok(());
        };
        let directive = &name[..colon];
        let target = &name[colon + 1..];
        let target_len = target.find('|').unwrap_or(target.len());
        let target_start = (name_start + colon + 1) as u32;
        let target = ByteRange::new(target_start, target_start + target_len as u32);

        match directive {
            "bind" | "class" | "style" => {
                if matches!(value, AttributeValue::None) {
                    expressions.push(target);
                }
                expressions.extend(value_expressions);
            }
            "use" | "transition" | "in" | "out" | "animate" => {
                expressions.push(target);
                expressions.extend(value_expressions);
            }
            "let" => match value {
                AttributeValue::Expression(pattern) => slot_params.push(pattern),
                _ => slot_params.push(target),
            },
            _ => expressions.extend(value_expressions),
        }
        Ok(())
    }

    fn scan_attribute_value(&mut self) -> Result<AttributeValue, SvelteError> {
        match self.bytes.get(self.pos).copied() {
            Some(quote @ (b'"' | b'\'')) => {
                let start = self.pos;
                self.pos += 1;
                let mut parts = Vec::new();
                loop {
                    match self.bytes.get(self.pos).copied() {
                        None => {
                            return Err(SvelteError::template("Unclosed attribute value", start))
                        }
                        Some(b) if b == quote => {
                            self.pos += 1;
                            break;
                        }
                        Some(b'{') => {
                            let close = self.closing_brace(self.pos)?;
                            parts.push(self.trimmed(self.pos + 1, close));
                            self.pos = close + 1;
                        }
                        Some(_) => self.pos += 1,
                    }
                }
                // a single mustache is the whole value
                Ok(AttributeValue::Text(parts))
            }
            Some(b'{') => {
                let close = self.closing_brace(self.pos)?;
                let expression = self.trimmed(self.pos + 1, close);
                self.pos = close + 1;
                Ok(AttributeValue::Expression(expression))
            }
            _ => {
                while let Some(&b) = self.bytes.get(self.pos) {
                    if b.is_ascii_whitespace()
                        || b == b'>'
                        || (b == b'/' && self.bytes.get(self.pos + 1) == Some(&b'>'))
                    {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(AttributeValue::Text(Vec::new()))
            }
        }
    }

    fn scan_closing_tag(&mut self) -> Result<(), SvelteError> {
        let start = self.pos;
        let src = self.src;
        let name = self.scan_name(start + 2);
        let name_text = &src[name.start as usize..name.end as usize];
        if let Some(index) = self.elements.iter().rposition(|e| e.name == name_text) {
            let floor = self.blocks.last().map_or(0, |block| block.elements);
            // an element opened outside the current block cannot close here
            if index >= floor {
                self.close_elements(index);
            }
        }
        if is_component(name_text) {
            self.emit_expression(name);
        }
        self.pos = self
            .find_byte(b'>', name.end as usize)
            .map(|i| i + 1)
            .ok_or_else(|| SvelteError::template(format!("Unclosed tag </{name_text}>"), start))?;
        Ok(())
    }

    fn close_elements(&mut self, depth: usize) {
        while self.elements.len() > depth {
            if let Some(element) = self.elements.pop() {
                if element.wrapped {
                    self.out.push("});\n");
                }
            }
        }
    }

    fn scan_name(&self, start: usize) -> ByteRange {
        let mut end = start;
        while let Some(&b) = self.bytes.get(end) {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.' | b'$') {
                end += 1;
            } else {
                break;
            }
        }
        ByteRange::new(start as u32, end as u32)
    }

    // --- mustaches ---

    fn scan_mustache(&mut self) -> Result<(), SvelteError> {
        let open = self.pos;
        let close = self.closing_brace(open)?;
        self.pos = close + 1;

        let content_start = open + 1;
        match self.bytes.get(content_start) {
            Some(b'#') => self.open_block(open, content_start + 1, close),
            Some(b':') => self.branch_block(open, content_start + 1, close),
            Some(b'/') => self.close_block(open, content_start + 1, close),
            Some(b'@') => self.special_tag(open, content_start + 1, close),
            _ => {
                let expression = self.trimmed(content_start, close);
                self.emit_expression(expression);
                Ok(())
            }
        }
    }

    fn open_block(&mut self, open: usize, start: usize, end: usize) -> Result<(), SvelteError> {
        let (keyword, rest) = self.keyword(start, end);
        let kind = BlockKind::from_keyword(keyword)
            .ok_or_else(|| SvelteError::template(format!("Unknown block {{#{keyword}}}"), open))?;

        let closer = match kind {
            BlockKind::If => {
                self.out.push("if (");
                self.out.push_source(self.src, rest);
                self.out.push(") {\n");
                "}\n"
            }
            BlockKind::Each => self.open_each(rest),
            BlockKind::Await => self.open_await(rest),
            BlockKind::Key => {
                self.emit_expression(rest);
                self.out.push("{\n");
                "}\n"
            }
            BlockKind::Snippet => {
                let src = self.src;
                let text = &src[rest.start as usize..rest.end as usize];
                match text.find('(') {
                    Some(paren) => {
                        let paren = rest.start as usize + paren;
                        let params_end = self
                            .top_level(paren + 1, rest.end as usize, |_, b| b == b')')
                            .unwrap_or(rest.end as usize);
                        let name = self.trimmed(rest.start as usize, paren);
                        let params = ByteRange::new(paren as u32 + 1, params_end as u32);
                        self.out.push("function ");
                        self.out.push_source(src, name);
                        self.out.push("(");
                        self.out.push_source(src, params);
                        self.out.push(") {\n");
                    }
                    None => {
                        self.out.push("function ");
                        self.out.push_source(self.src, rest);
                        self.out.push("() {\n");
                    }
                }
                "}\n"
            }
        };

        self.blocks.push(Block {
            kind,
            start: open,
            closer,
            elements: self.elements.len(),
        });
        Ok(())
    }

    /// `{#each list as pattern, index (key)}`
    fn open_each(&mut self, rest: ByteRange) -> &'static str {
        let (start, end) = (rest.start as usize, rest.end as usize);
        let (list, item) = match self.find_keyword(start, end, "as") {
            Some(at) => (self.trimmed(start, at), Some(at + 2)),
            None => (rest, None),
        };

        let (list, pattern, index, key) = match item {
            Some(item_start) => {
                let pattern_end = self
                    .top_level(item_start, end, |_, b| b == b',' || b == b'(')
                    .unwrap_or(end);
                let pattern = self.trimmed(item_start, pattern_end);
                let (index, key_start) = if self.bytes.get(pattern_end) == Some(&b',') {
                    let index_end = self
                        .top_level(pattern_end + 1, end, |_, b| b == b'(')
                        .unwrap_or(end);
                    (Some(self.trimmed(pattern_end + 1, index_end)), index_end)
                } else {
                    (None, pattern_end)
                };
                let key = (self.bytes.get(key_start) == Some(&b'(')).then(|| {
                    let key_end = self
                        .top_level(key_start + 1, end, |_, b| b == b')')
                        .unwrap_or(end);
                    self.trimmed(key_start + 1, key_end)
                });
                (list, Some(pattern), index, key)
            }
            // {#each list, index}
            None => match self.top_level(start, end, |_, b| b == b',') {
                Some(comma) => (
                    self.trimmed(start, comma),
                    None,
                    Some(self.trimmed(comma + 1, end)),
                    None,
                ),
                None => (list, None, None, None),
            },
        };

        self.emit_expression(list);
        self.out.push("((");
        match pattern {
            Some(pattern) => self.out.push_source(self.src, pattern),
            None => self.out.push(ANONYMOUS_ITEM),
        }
        if let Some(index) = index {
            self.out.push(", ");
            self.out.push_source(self.src, index);
        }
        self.out.push(") => {\n");
        if let Some(key) = key {
            self.emit_expression(key);
        }
        "});\n"
    }

    /// `{#await promise}`, `{#await promise then value}`,
    /// `{#await promise catch error}`
    fn open_await(&mut self, rest: ByteRange) -> &'static str {
        let (start, end) = (rest.start as usize, rest.end as usize);
        let branch = self
            .find_keyword(start, end, "then")
            .map(|at| (at, 4))
            .or_else(|| self.find_keyword(start, end, "catch").map(|at| (at, 5)));

        match branch {
            Some((at, len)) => {
                let promise = self.trimmed(start, at);
                let value = self.trimmed(at + len, end);
                self.emit_expression(promise);
                self.open_branch_value(value)
            }
            None => {
                self.emit_expression(rest);
                self.out.push("{\n");
                "}\n"
            }
        }
    }

    fn open_branch_value(&mut self, value: ByteRange) -> &'static str {
        if value.is_empty() {
            self.out.push("{\n");
            "}\n"
        } else {
            self.out.push("((");
            self.out.push_source(self.src, value);
            self.out.push(") => {\n");
            "});\n"
        }
    }

    fn branch_block(&mut self, open: usize, start: usize, end: usize) -> Result<(), SvelteError> {
        let (keyword, rest) = self.keyword(start, end);
        let unexpected = || SvelteError::template(format!("Unexpected {{:{keyword}}}"), open);
        let (kind, elements, closer) = match self.blocks.last() {
            Some(block) => (block.kind, block.elements, block.closer),
            None => return Err(unexpected()),
        };
        self.close_elements(elements);

        let next_closer = match (kind, keyword) {
            (BlockKind::If, "else") => {
                let (word, condition) = self.keyword(rest.start as usize, rest.end as usize);
                if word == "if" {
                    self.out.push("} else if (");
                    self.out.push_source(self.src, condition);
                    self.out.push(") {\n");
                } else {
                    self.out.push("} else {\n");
                }
                "}\n"
            }
            (BlockKind::Each, "else") => {
                self.out.push(closer);
                self.out.push("{\n");
                "}\n"
            }
            (BlockKind::Await, "then" | "catch") => {
                self.out.push(closer);
                self.open_branch_value(rest)
            }
            _ => return Err(unexpected()),
        };
        if let Some(block) = self.blocks.last_mut() {
            block.closer = next_closer;
        }
        Ok(())
    }

    fn close_block(&mut self, open: usize, start: usize, end: usize) -> Result<(), SvelteError> {
        let (keyword, _) = self.keyword(start, end);
        let Some(block) = self.blocks.pop() else {
            return Err(SvelteError::template(
                format!("Unexpected {{/{keyword}}}"),
                open,
            ));
        };
        if block.kind.keyword() != keyword {
            return Err(SvelteError::template(
                format!("Expected {{/{}}}", block.kind.keyword()),
                open,
            ));
        }
        self.close_elements(block.elements);
        self.out.push(block.closer);
        Ok(())
    }

    fn special_tag(&mut self, open: usize, start: usize, end: usize) -> Result<(), SvelteError> {
        let (keyword, rest) = self.keyword(start, end);
        match keyword {
            "html" | "debug" | "render" => {
                if !rest.is_empty() {
                    self.emit_expression(rest);
                }
            }
            "const" => {
                self.out.push("const ");
                self.out.push_source(self.src, rest);
                self.out.push(";\n");
            }
            _ => {
                return Err(SvelteError::template(
                    format!("Unknown tag {{@{keyword}}}"),
                    open,
                ))
            }
        }
        Ok(())
    }

    // --- helpers ---

    fn emit_expression(&mut self, range: ByteRange) {
        self.out.push("(");
        self.out.push_source(self.src, range);
        self.out.push(");\n");
    }

    /// Leading word of `start..end` and the trimmed rest.
    fn keyword(&self, start: usize, end: usize) -> (&'s str, ByteRange) {
        let mut word_end = start;
        while word_end < end && self.bytes[word_end].is_ascii_alphabetic() {
            word_end += 1;
        }
        (&self.src[start..word_end], self.trimmed(word_end, end))
    }

    /// Position of `keyword` delimited by whitespace, outside of brackets
    /// and strings.
    fn find_keyword(&self, start: usize, end: usize, keyword: &str) -> Option<usize> {
        let bytes = self.bytes;
        self.top_level(start, end, |at, _| {
            let after = at + keyword.len();
            at > start
                && bytes[at - 1].is_ascii_whitespace()
                && bytes[at..end].starts_with(keyword.as_bytes())
                && (after == end || bytes[after].is_ascii_whitespace())
        })
    }

    /// First position in `start..end` at bracket depth zero, outside of
    /// strings, accepted by `stop`.
    fn top_level(
        &self,
        start: usize,
        end: usize,
        mut stop: impl FnMut(usize, u8) -> bool,
    ) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = start;
        while i < end {
            let b = self.bytes[i];
            if matches!(b, b'"' | b'\'' | b'`') {
                i = skip_string(self.bytes, i, end);
                continue;
            }
            if depth == 0 && stop(i, b) {
                return Some(i);
            }
            match b {
                b'{' | b'(' | b'[' => depth += 1,
                b'}' | b')' | b']' => depth = depth.saturating_sub(1),
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// Matching `}` of the `{` at `open`.
    fn closing_brace(&self, open: usize) -> Result<usize, SvelteError> {
        self.top_level(open + 1, self.bytes.len(), |_, b| b == b'}')
            .ok_or_else(|| SvelteError::template("Unexpected end of input", open))
    }

    fn trimmed(&self, start: usize, end: usize) -> ByteRange {
        let mut start = start.min(end);
        let mut end = end;
        while start < end && self.bytes[start].is_ascii_whitespace() {
            start += 1;
        }
        while end > start && self.bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        ByteRange::new(start as u32, end as u32)
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn find_byte(&self, byte: u8, from: usize) -> Option<usize> {
        self.bytes[from.min(self.bytes.len())..]
            .iter()
            .position(|&b| b == byte)
            .map(|i| from + i)
    }
}

fn skip_string(bytes: &[u8], start: usize, end: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < end {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    end
}

fn is_component(name: &str) -> bool {
    !name.contains(':')
        && (name.starts_with(|c: char| c.is_ascii_uppercase()) || name.contains('.'))
}

fn is_module_script(attributes: &str) -> bool {
    attributes.contains("context=\"module\"")
        || attributes.contains("context='module'")
        || attributes
            .split(|c: char| c.is_ascii_whitespace() || c == '/')
            .any(|word| word == "module")
}

fn is_typescript(attributes: &str) -> bool {
    ["lang=\"ts\"", "lang='ts'", "lang=\"typescript\"", "lang='typescript'"]
        .iter()
        .any(|lang| attributes.contains(lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(source: &str) -> String {
        let component = scan_component(source).unwrap();
        component
            .program
            .code()
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != ";")
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_scripts_are_copied() {
        let source = "<script context=\"module\">const a = 1</script>\n<script>let b = a</script>";
        let component = scan_component(source).unwrap();
        assert_eq!(generated(source), "const a = 1 let b = a");
        assert_eq!(
            component.module_script.and_then(|r| r.slice(source)),
            Some("const a = 1")
        );
        assert_eq!(
            component.instance_script.and_then(|r| r.slice(source)),
            Some("let b = a")
        );
        assert!(!component.typescript);
    }

    #[test]
    fn test_module_attribute() {
        let component = scan_component("<script module lang=\"ts\">x</script>").unwrap();
        assert!(component.module_script.is_some());
        assert!(component.typescript);
    }

    #[test]
    fn test_mustaches() {
        assert_eq!(generated("<p>{a} and { b = 1 }</p>"), "(a); (b = 1);");
    }

    #[test]
    fn test_if_blocks() {
        assert_eq!(
            generated("{#if a}x{:else if b}y{:else}z{/if}"),
            "if (a) { } else if (b) { } else { }"
        );
    }

    #[test]
    fn test_each_blocks() {
        assert_eq!(
            generated("{#each items as { id, name }, i (id)}{name}{:else}none{/each}"),
            "(items); (({ id, name }, i) => { (id); (name); }); { }"
        );
        assert_eq!(
            generated("{#each items, i}{i}{/each}"),
            "(items); (($$item, i) => { (i); });"
        );
    }

    #[test]
    fn test_await_blocks() {
        assert_eq!(
            generated("{#await p}..{:then v}{v}{:catch e}{e}{/await}"),
            "(p); { } ((v) => { (v); }); ((e) => { (e); });"
        );
        assert_eq!(
            generated("{#await p then v}{v}{/await}"),
            "(p); ((v) => { (v); });"
        );
    }

    #[test]
    fn test_key_snippet_and_special_tags() {
        assert_eq!(generated("{#key k}{/key}"), "(k); { }");
        assert_eq!(
            generated("{#snippet row(item)}{@render cell(item)}{/snippet}"),
            "function row(item) { (cell(item)); }"
        );
        assert_eq!(
            generated("{@const total = a + b}{@html total}{@debug a, b}"),
            "const total = a + b; (total); (a, b);"
        );
    }

    #[test]
    fn test_components_and_directives() {
        assert_eq!(
            generated("<Foo bar={x} {y} {...rest}>text</Foo>"),
            "(Foo); (x); (y); (rest); (Foo);"
        );
        assert_eq!(
            generated("<div use:action transition:fade|local={p} on:click={go} bind:value class:on={c}/>"),
            "(action); (fade); (p); (go); (value); (c);"
        );
        assert_eq!(
            generated("<input class=\"a {b ? 'x' : 'y'}\" disabled>"),
            "(b ? 'x' : 'y');"
        );
    }

    #[test]
    fn test_slot_props() {
        assert_eq!(
            generated("<Cmp let:item let:index={i}><p>{item}</p></Cmp>"),
            "(Cmp); ((item, i) => { (item); }); (Cmp);"
        );
    }

    #[test]
    fn test_style_and_comments_are_skipped() {
        assert_eq!(
            generated("<style>p { color: red }</style><!-- {a} -->{b}"),
            "(b);"
        );
    }

    #[test]
    fn test_segments_map_back() {
        let source = "<p>{value}</p>";
        let component = scan_component(source).unwrap();
        let program = &component.program;
        let at = program.code().find("value").unwrap() as u32;
        assert_eq!(
            program.source_range(ByteRange::new(at, at + 5)),
            Some(ByteRange::new(4, 9))
        );
    }

    #[test]
    fn test_errors() {
        let err = scan_component("<div>\n{#if a}\n</div>").unwrap_err();
        assert_eq!(
            err,
            SvelteError::Template {
                message: "Block {#if} was left open".into(),
                offset: 6
            }
        );

        let err = scan_component("{#if a}{/each}").unwrap_err();
        assert!(err.to_string().contains("Expected {/if}"));

        let err = scan_component("{:else}").unwrap_err();
        assert!(err.to_string().contains("Unexpected {:else}"));

        let err = scan_component("<p>{a</p>").unwrap_err();
        assert!(matches!(err, SvelteError::Template { offset: 3, .. }));
    }
}
