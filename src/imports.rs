/// Import declaration scanning.
///
/// A small hand-written scanner over the `<script>` block that recognises
/// top-level ES module import declarations:
///
///   - `import Foo from "mod"`
///   - `import { A, B as C } from "mod"`
///   - `import Foo, { A } from "mod"` / `import Foo, * as Ns from "mod"`
///   - `import * as Ns from "mod"`
///   - `import "mod"` (side effects only, binds nothing)
///
/// `import type ...` declarations and `type` entries inside braces are
/// dropped since they can never name a component.  Comments, string and
/// template literals are skipped so an `import` inside them is not misread.
/// Dynamic `import(...)` and `import.meta` are ignored.
use crate::naming::normalize_component_name;
use crate::types::{ImportBinding, ImportDeclaration, ModuleSpecifier, NamedBinding};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Str(String),
    Punct(char),
}

/// Keywords after which a `/` starts a regular expression literal rather
/// than a division.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case",
    "do", "else", "yield", "await",
];

/// Splits script source into identifiers, string literals and punctuation.
/// Regular expression literals are skipped and surface as a single `/`.
struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    regex_allowed: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            regex_allowed: true,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = &self.src[self.pos..];
            if let Some(c) = rest.chars().next()
                && c.is_whitespace()
            {
                self.pos += c.len_utf8();
            } else if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                self.pos += rest[2..].find("*/").map(|i| i + 4).unwrap_or(rest.len());
            } else {
                return;
            }
        }
    }

    /// Read a quoted string body after the opening `quote` was consumed.
    fn read_string(&mut self, quote: char) -> String {
        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    if let Some(escaped) = self.bump() {
                        value.push(escaped);
                    }
                }
                c if c == quote => break,
                '\n' if quote != '`' => break,
                c => value.push(c),
            }
        }
        value
    }

    /// Skip a regular expression body after the opening `/` was consumed,
    /// including its flags.  A line break ends an unterminated literal.
    fn skip_regex(&mut self) {
        let mut in_class = false;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                return;
            }
            self.pos += c.len_utf8();
            match c {
                '\\' => {
                    if let Some(escaped) = self.peek_char()
                        && escaped != '\n'
                    {
                        self.pos += escaped.len_utf8();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(flag) = self.peek_char() {
            if !is_ident_char(flag) {
                break;
            }
            self.pos += flag.len_utf8();
        }
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.scan_token()?;
        self.regex_allowed = match &token {
            Token::Ident(word) => REGEX_PRECEDING_KEYWORDS.contains(word),
            Token::Str(_) => false,
            Token::Punct(c) => !matches!(c, ')' | ']' | '}' | '`' | '/'),
        };
        Some(token)
    }

    fn scan_token(&mut self) -> Option<Token<'a>> {
        self.skip_trivia();
        let src = self.src;
        let start = self.pos;
        let c = self.bump()?;

        if c == '/' && self.regex_allowed {
            self.skip_regex();
            return Some(Token::Punct('/'));
        }
        if c == '"' || c == '\'' {
            return Some(Token::Str(self.read_string(c)));
        }
        if c == '`' {
            // Template literals never carry an import specifier; skip them.
            self.read_string('`');
            return Some(Token::Punct('`'));
        }
        if is_ident_char(c) {
            while let Some(next) = self.peek_char() {
                if !is_ident_char(next) {
                    break;
                }
                self.pos += next.len_utf8();
            }
            return Some(Token::Ident(&src[start..self.pos]));
        }
        Some(Token::Punct(c))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Cursor over the token stream with one token of lookahead.
struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + offset)
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek() == Some(&Token::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(w)) if *w == word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(Token::Ident(w)) => {
                let w = *w;
                self.pos += 1;
                Some(w)
            }
            _ => None,
        }
    }

    fn string(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Str(s)) => {
                let s = s.clone();
                self.pos += 1;
                Some(s)
            }
            _ => None,
        }
    }
}

/// Parse every top-level import declaration in `script`, in source order.
pub fn parse_imports(script: &str) -> Vec<ImportDeclaration> {
    let mut parser = Parser {
        tokens: Tokenizer::new(script).collect(),
        pos: 0,
    };
    let mut imports = Vec::new();
    let mut depth: usize = 0;
    let mut previous: Option<Token> = None;

    while let Some(token) = parser.next() {
        match &token {
            Token::Punct('{') | Token::Punct('(') | Token::Punct('[') => depth += 1,
            Token::Punct('}') | Token::Punct(')') | Token::Punct(']') => {
                depth = depth.saturating_sub(1)
            }
            Token::Ident("import")
                if depth == 0 && previous != Some(Token::Punct('.')) =>
            {
                let checkpoint = parser.pos;
                match parse_import_declaration(&mut parser) {
                    Some(Some(declaration)) => imports.push(declaration),
                    Some(None) => {}
                    None => {
                        parser.pos = checkpoint;
                        if matches!(
                            parser.peek(),
                            Some(Token::Ident(_)) | Some(Token::Punct('{')) | Some(Token::Punct('*'))
                        ) {
                            skip_malformed_declaration(&mut parser);
                        }
                    }
                }
            }
            _ => {}
        }
        previous = Some(token);
    }

    imports
}

/// Skip past a broken `import ...` so its unbalanced braces do not hide the
/// declarations that follow.  Stops after the next string literal or `;`,
/// or before the next `import`.
fn skip_malformed_declaration(parser: &mut Parser<'_>) {
    loop {
        let stop_after = match parser.peek() {
            None | Some(Token::Ident("import")) => return,
            Some(Token::Str(_)) | Some(Token::Punct(';')) => true,
            Some(_) => false,
        };
        parser.pos += 1;
        if stop_after {
            return;
        }
    }
}

/// Parse what follows an `import` keyword.
///
/// Returns `None` when the tokens are not an import declaration (the
/// caller rewinds), `Some(None)` for a well-formed `import type`
/// declaration that is dropped, and `Some(Some(..))` otherwise.
fn parse_import_declaration(parser: &mut Parser<'_>) -> Option<Option<ImportDeclaration>> {
    if let Some(value) = parser.string() {
        return Some(Some(ImportDeclaration {
            binding: ImportBinding::default(),
            specifier: ModuleSpecifier::new(value),
        }));
    }

    let type_only = matches!(parser.peek(), Some(Token::Ident("type")))
        && match parser.peek_at(1) {
            Some(Token::Ident(next)) => *next != "from",
            Some(Token::Punct('{')) | Some(Token::Punct('*')) => true,
            _ => false,
        };
    if type_only {
        parser.pos += 1;
    }

    let mut binding = ImportBinding::default();

    if let Some(Token::Ident(name)) = parser.peek()
        && *name != "from"
    {
        binding.default_name = parser.ident().map(str::to_string);
        if !parser.eat_punct(',') {
            return finish_declaration(parser, binding, type_only);
        }
    }

    if parser.eat_punct('*') {
        if !parser.eat_ident("as") {
            return None;
        }
        binding.namespace_name = Some(parser.ident()?.to_string());
    } else if parser.eat_punct('{') {
        binding.named_bindings = parse_named_bindings(parser)?;
    } else if binding.default_name.is_none() {
        return None;
    }

    finish_declaration(parser, binding, type_only)
}

fn finish_declaration(
    parser: &mut Parser<'_>,
    binding: ImportBinding,
    type_only: bool,
) -> Option<Option<ImportDeclaration>> {
    if !parser.eat_ident("from") {
        return None;
    }
    let value = parser.string()?;
    if type_only {
        return Some(None);
    }
    Some(Some(ImportDeclaration {
        binding,
        specifier: ModuleSpecifier::new(value),
    }))
}

/// Parse the inside of `{ ... }` after the opening brace was consumed.
fn parse_named_bindings(parser: &mut Parser<'_>) -> Option<Vec<NamedBinding>> {
    let mut named = Vec::new();

    loop {
        if parser.eat_punct('}') {
            return Some(named);
        }

        // `{ type Foo }` imports a type only.
        let type_only = matches!(parser.peek(), Some(Token::Ident("type")))
            && matches!(parser.peek_at(1), Some(Token::Ident(_)) | Some(Token::Str(_)))
            && !matches!(parser.peek_at(1), Some(Token::Ident("as")));
        if type_only {
            parser.pos += 1;
        }

        let specifier = match parser.next()? {
            Token::Ident(name) => name.to_string(),
            Token::Str(name) => name,
            Token::Punct(_) => return None,
        };
        let binding = if parser.eat_ident("as") {
            parser.ident()?.to_string()
        } else {
            specifier.clone()
        };

        if !type_only {
            named.push(NamedBinding { specifier, binding });
        }

        if !parser.eat_punct(',') && parser.peek() != Some(&Token::Punct('}')) {
            return None;
        }
    }
}

/// Whether `binding` introduces a name that normalises to `identifier`.
///
/// `identifier` must already be normalised.
pub fn binding_matches(binding: &ImportBinding, identifier: &str) -> bool {
    let matches = |name: &str| normalize_component_name(name) == identifier;

    binding.default_name.as_deref().is_some_and(matches)
        || binding.namespace_name.as_deref().is_some_and(matches)
        || binding
            .named_bindings
            .iter()
            .any(|named| matches(&named.specifier) || matches(&named.binding))
}

/// Find the module specifier of the first import (in source order) that
/// binds `identifier`.
///
/// `identifier` must already be normalised with
/// [`normalize_component_name`].
pub fn locate_import(script: &str, identifier: &str) -> Option<ModuleSpecifier> {
    parse_imports(script)
        .into_iter()
        .find(|declaration| binding_matches(&declaration.binding, identifier))
        .map(|declaration| declaration.specifier)
}
