//! XML parser producing a [`Document`] tree

use indexmap::IndexMap;

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result, Span};
use crate::xrd::cursor::Cursor;
use crate::xrd::tree::{is_name_char, is_name_start, Content, Document, Node};

/// XML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    max_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Parser over `input`, nesting limited to the default [`Config`] depth
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            max_depth: Config::new().max_depth,
            depth: 0,
        }
    }

    /// Fail once elements nest deeper than `max_depth`
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse an XML document
    pub fn parse(&mut self) -> Result<Document> {
        if self.cursor.starts_with(b"\xEF\xBB\xBF") {
            self.cursor.advance_by(3);
        }
        self.skip_misc()?;
        if self.cursor.is_eof() {
            return Err(self.error_here("missing root element"));
        }
        let root = self.parse_element()?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(self.error_here("content after root element"));
        }

        Ok(Document { root })
    }

    /// Skip whitespace, comments, processing instructions and DOCTYPE
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
            } else if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
            } else if self.cursor.starts_with(b"<!DOCTYPE") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self) -> Result<Node> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let pos = self.cursor.position();
            return Err(Error::with_message(
                ErrorKind::MaxDepthExceeded {
                    max: self.max_depth,
                },
                Span::at(pos),
                format!("max depth exceeded: {}", self.max_depth),
            ));
        }

        self.expect_byte(b'<')?;
        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.consume(b'/') {
            self.expect_byte(b'>')?;
            self.depth -= 1;
            return Ok(Node {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            if self.cursor.is_eof() {
                return Err(self.error_here("unterminated element"));
            }

            if self.cursor.starts_with(b"</") {
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != name {
                    return Err(self.error_here("mismatched closing tag"));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.skip_until(b"-->")?;
            } else if self.cursor.starts_with(b"<![CDATA[") {
                self.cursor.advance_by(9);
                children.push(Content::Text(self.parse_cdata()?));
            } else if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.skip_until(b"?>")?;
            } else if self.cursor.current() == Some(b'<') {
                children.push(Content::Node(self.parse_element()?));
            } else {
                children.push(Content::Text(self.parse_text()?));
            }
        }

        self.depth -= 1;
        Ok(Node {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here("unexpected end of input")),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here("duplicate attribute"));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.error_here("expected quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = self.bytes_to_string(raw)?;
                return self.decode_entities(&text);
            }
            if b == b'<' {
                return Err(self.error_here("'<' in attribute value"));
            }
            self.cursor.advance();
        }

        Err(self.error_here("unterminated attribute value"))
    }

    fn parse_text(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = self.bytes_to_string(raw)?;
        self.decode_entities(&text)
    }

    fn parse_cdata(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(b"]]>") {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                return self.bytes_to_string(raw);
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated CDATA section"))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        match self.cursor.current() {
            Some(first) if is_name_start(first) => self.cursor.advance(),
            _ => return Err(self.error_here("expected name")),
        }

        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let raw = self.cursor.slice_from(start);
        self.bytes_to_string(raw)
    }

    fn skip_doctype(&mut self) -> Result<()> {
        // internal subsets nest one level of brackets
        let mut in_subset = false;
        while let Some(b) = self.cursor.current() {
            self.cursor.advance();
            match b {
                b'[' => in_subset = true,
                b']' => in_subset = false,
                b'>' if !in_subset => return Ok(()),
                _ => {}
            }
        }
        Err(self.error_here("unterminated DOCTYPE"))
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(self.error_here(&format!("expected '{}'", char::from(expected))))
        }
    }

    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| self.error_here("invalid utf-8"))
    }

    fn decode_entities(&self, input: &str) -> Result<String> {
        if !input.contains('&') {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(amp) = rest.find('&') {
            let (head, tail) = rest.split_at(amp);
            result.push_str(head);

            let Some(semi) = tail.find(';') else {
                return Err(self.error_here("unterminated xml entity"));
            };
            let entity = tail.get(1..semi).unwrap_or_default();
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_numeric_entity(entity),
            };
            match decoded {
                Some(ch) => result.push(ch),
                None => return Err(self.error_here(&format!("invalid xml entity &{entity};"))),
            }
            rest = tail.get(semi + 1..).unwrap_or_default();
        }
        result.push_str(rest);

        Ok(result)
    }

    fn error_here(&self, message: &str) -> Error {
        Error::with_message(
            ErrorKind::MalformedXml,
            Span::at(self.cursor.position()),
            message.to_string(),
        )
    }
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    #[test]
    fn test_parse_simple_element() -> Result<()> {
        let doc = parse("<root></root>")?;
        assert_eq!(doc.root.name, "root");
        assert!(doc.root.children.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_with_attributes() -> Result<()> {
        let doc = parse("<root xml:id=\"1\" name='te&amp;st'></root>")?;
        assert_eq!(doc.root.attr("xml:id"), Some("1"));
        assert_eq!(doc.root.attr("name"), Some("te&st"));
        Ok(())
    }

    #[test]
    fn test_parse_nested_keeps_text_verbatim() -> Result<()> {
        let doc = parse("<root>\n  <child> text </child>\n</root>")?;
        let child = doc.root.nodes().next().map(Node::text);
        assert_eq!(child.as_deref(), Some(" text "));
        assert_eq!(doc.root.text(), "\n  \n");
        Ok(())
    }

    #[test]
    fn test_parse_self_closing() -> Result<()> {
        let doc = parse("<root><child /></root>")?;
        let child = doc.root.nodes().next();
        assert_eq!(child.map(|c| c.name.as_str()), Some("child"));
        assert_eq!(child.map(|c| c.children.len()), Some(0));
        Ok(())
    }

    #[test]
    fn test_prolog_comments_and_cdata() -> Result<()> {
        let input = "\u{feff}<?xml version=\"1.0\"?>\n<!DOCTYPE XRD [<!ENTITY x \"y\">]>\n\
                     <!-- leading --><XRD><!-- inner --><A><![CDATA[<raw> & ]]>tail</A></XRD>\n<!-- trailing -->";
        let doc = parse(input)?;
        assert_eq!(doc.root.name, "XRD");
        let a = doc.root.nodes().next().map(Node::text);
        assert_eq!(a.as_deref(), Some("<raw> & tail"));
        Ok(())
    }

    #[test]
    fn test_numeric_entities() -> Result<()> {
        let doc = parse("<a>&#65;&#x42;&lt;</a>")?;
        assert_eq!(doc.root.text(), "AB<");
        Ok(())
    }

    #[test]
    fn test_errors_carry_position() {
        let err = parse("<a>\n<b></c></a>").err();
        let kind = err.as_ref().map(|e| e.kind().clone());
        assert_eq!(kind, Some(ErrorKind::MalformedXml));
        assert_eq!(err.map(|e| e.span().start.line), Some(2));
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(parse("").is_err());
        assert!(parse("<a>").is_err());
        assert!(parse("<a x=\"1\" x=\"2\"/>").is_err());
        assert!(parse("<a/><b/>").is_err());
        assert!(parse("<a>&bogus;</a>").is_err());
        assert!(parse("<a>&amp</a>").is_err());
    }

    #[test]
    fn test_max_depth() {
        let mut parser = Parser::new(b"<a><b><c/></b></a>").with_max_depth(2);
        let kind = parser.parse().map_err(|e| e.kind().clone());
        assert_eq!(kind, Err(ErrorKind::MaxDepthExceeded { max: 2 }));

        let mut parser = Parser::new(b"<a><b><c/></b></a>").with_max_depth(3);
        assert!(parser.parse().is_ok());
    }

    #[test]
    fn test_default_depth_is_bounded() {
        let max = Config::default().max_depth;
        let input = format!("{}{}", "<a>".repeat(max + 1), "</a>".repeat(max + 1));
        let kind = parse(&input).map_err(|e| e.kind().clone());
        assert_eq!(kind, Err(ErrorKind::MaxDepthExceeded { max }));

        let input = format!("{}{}", "<a>".repeat(max), "</a>".repeat(max));
        assert!(parse(&input).is_ok());
    }
}
