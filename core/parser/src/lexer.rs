//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans one directive line and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the directive pipeline. It handles
//! whitespace skipping, quoted values (which may contain whitespace),
//! directive keywords and the comparison operators used by rules.
//!
//! SUPPORTED OPERATORS:
//! - Single char: = < >
//! - Multi char: == != <= >=

use crate::ast::ComparisonOperator;
use crate::token::Token;
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    /// Tokenizes a whole line, without the trailing EOL.
    pub fn tokenize(input: &'a str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            match lexer.next_token() {
                Token::EOL => return tokens,
                token => tokens.push(token),
            }
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.input.next() {
            Some('@') => self.read_directive(),
            Some('=') => self.read_equals_operator(),
            Some('<') => self.read_angle_operator(ComparisonOperator::LessThan, ComparisonOperator::LessEqual),
            Some('>') => self.read_angle_operator(ComparisonOperator::GreaterThan, ComparisonOperator::GreaterEqual),
            Some('!') => self.read_bang_operator(),
            Some(quote @ ('"' | '\'')) => self.read_quoted(quote),
            Some(ch) => self.read_word(ch),
            None => Token::EOL,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    fn read_directive(&mut self) -> Token {
        let mut name = String::new();
        while let Some(&ch) = self.input.peek() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            name.push(ch);
            self.input.next();
        }
        if name.is_empty() {
            Token::Illegal('@')
        } else {
            Token::Directive(name)
        }
    }

    /// Handles '=' and '=='
    fn read_equals_operator(&mut self) -> Token {
        match self.input.peek() {
            Some('=') => {
                self.input.next();
                Token::Compare(ComparisonOperator::Equal)
            }
            _ => Token::Assign,
        }
    }

    /// Handles '<', '<=', '>' and '>='
    fn read_angle_operator(&mut self, strict: ComparisonOperator, inclusive: ComparisonOperator) -> Token {
        match self.input.peek() {
            Some('=') => {
                self.input.next();
                Token::Compare(inclusive)
            }
            _ => Token::Compare(strict),
        }
    }

    /// Handles '!='; a lone '!' is illegal.
    fn read_bang_operator(&mut self) -> Token {
        match self.input.peek() {
            Some('=') => {
                self.input.next();
                Token::Compare(ComparisonOperator::NotEqual)
            }
            _ => Token::Illegal('!'),
        }
    }

    /// Reads until the matching quote. An unterminated quote runs to end of line.
    fn read_quoted(&mut self, quote: char) -> Token {
        let mut result = String::new();
        for ch in self.input.by_ref() {
            if ch == quote {
                return Token::Quoted(result);
            }
            result.push(ch);
        }
        Token::Quoted(result)
    }

    fn read_word(&mut self, first: char) -> Token {
        let mut word = String::new();
        word.push(first);
        while let Some(&ch) = self.input.peek() {
            if ch.is_whitespace() || matches!(ch, '=' | '<' | '>') || self.at_not_equal() {
                break;
            }
            word.push(ch);
            self.input.next();
        }
        Token::Word(word)
    }

    /// True when the upcoming characters are "!=".
    fn at_not_equal(&self) -> bool {
        let mut ahead = self.input.clone();
        ahead.next() == Some('!') && ahead.peek() == Some(&'=')
    }
}
