use super::*;
use super::scanner::{bump, skip_whitespace_and_comments};

pub(super) fn next_token(lexer: &mut Lexer) -> Result<Token, AsonError> {
    skip_whitespace_and_comments(lexer);

    match lexer.peek {
        Some('{') => tokenize_symbol(lexer, Token::LBrace),
        Some('}') => tokenize_symbol(lexer, Token::RBrace),
        Some('[') => tokenize_symbol(lexer, Token::LBracket),
        Some(']') => tokenize_symbol(lexer, Token::RBracket),
        Some(':') => tokenize_symbol(lexer, Token::Colon),
        Some(',') => tokenize_symbol(lexer, Token::Comma),
        Some('"') | Some('\'') => tokenize_string(lexer),
        Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => tokenize_number(lexer),
        Some(c) if c.is_alphabetic() || c == '_' => tokenize_identifier_or_keyword(lexer),
        Some(ch) => tokenize_unexpected_char(lexer, ch),
        None => Ok(Token::Eof),
    }
}

fn tokenize_symbol(lexer: &mut Lexer, token: Token) -> Result<Token, AsonError> {
    bump(lexer);
    Ok(token)
}

fn tokenize_string(lexer: &mut Lexer) -> Result<Token, AsonError> {
    let start_line = lexer.line;
    let start_column = lexer.column;
    let quote = match bump(lexer) {
        Some(q) => q,
        None => return Ok(Token::Eof),
    };
    let mut content = String::new();

    loop {
        let Some(ch) = bump(lexer) else {
            return Err(unclosed(quote, start_line, start_column, "String literal not closed"));
        };

        if ch == quote {
            return Ok(Token::String(content));
        }

        if ch != '\\' {
            content.push(ch);
            continue;
        }

        let Some(next_ch) = bump(lexer) else {
            return Err(unclosed(quote, start_line, start_column, "Trailing backslash in string"));
        };
        match next_ch {
            'n' => content.push('\n'),
            't' => content.push('\t'),
            'r' => content.push('\r'),
            'b' => content.push('\u{0008}'),
            'f' => content.push('\u{000C}'),
            '/' => content.push('/'),
            '\\' => content.push('\\'),
            '"' => content.push('"'),
            '\'' => content.push('\''),
            'u' => content.push(read_unicode_escape(lexer)?),
            // Unknown escapes keep their backslash, which is how `\${name}` survives.
            other => {
                content.push('\\');
                content.push(other);
            }
        }
    }
}

fn unclosed(quote: char, line: usize, column: usize, hint: &str) -> AsonError {
    AsonError::UnclosedString {
        quote,
        line,
        column,
        hint: Some(hint.into()),
        code: Some(103),
    }
}

fn read_hex4(lexer: &mut Lexer) -> Result<u32, AsonError> {
    let mut digits = String::new();
    for _ in 0..4 {
        match bump(lexer) {
            Some(c) if c.is_ascii_hexdigit() => digits.push(c),
            _ => {
                return Err(AsonError::SyntaxError {
                    message: format!("Invalid unicode escape '\\u{}'", digits),
                    line: lexer.line,
                    column: lexer.column,
                    hint: Some("Unicode escapes need exactly four hex digits".into()),
                    code: Some(105),
                });
            }
        }
    }
    u32::from_str_radix(&digits, 16).map_err(|_| AsonError::SyntaxError {
        message: format!("Invalid unicode escape '\\u{}'", digits),
        line: lexer.line,
        column: lexer.column,
        hint: None,
        code: Some(105),
    })
}

fn read_unicode_escape(lexer: &mut Lexer) -> Result<char, AsonError> {
    let first = read_hex4(lexer)?;
    let code_point = if (0xD800..0xDC00).contains(&first) {
        // high surrogate, expect `\uDC00`-`\uDFFF` next
        if bump(lexer) != Some('\\') || bump(lexer) != Some('u') {
            return Err(AsonError::SyntaxError {
                message: "Unpaired surrogate in unicode escape".into(),
                line: lexer.line,
                column: lexer.column,
                hint: Some("Follow a high surrogate with a low surrogate escape".into()),
                code: Some(106),
            });
        }
        let second = read_hex4(lexer)?;
        if !(0xDC00..0xE000).contains(&second) {
            return Err(AsonError::SyntaxError {
                message: format!("Expected low surrogate, got U+{:04X}", second),
                line: lexer.line,
                column: lexer.column,
                hint: None,
                code: Some(106),
            });
        }
        0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
    } else {
        first
    };

    char::from_u32(code_point).ok_or_else(|| AsonError::SyntaxError {
        message: format!("Invalid code point U+{:04X}", code_point),
        line: lexer.line,
        column: lexer.column,
        hint: None,
        code: Some(106),
    })
}

fn tokenize_number(lexer: &mut Lexer) -> Result<Token, AsonError> {
    let line = lexer.line;
    let column = lexer.column;
    let mut num = String::new();

    if let Some(sign @ ('-' | '+')) = lexer.peek {
        num.push(sign);
        bump(lexer);
    }

    while let Some(ch) = lexer.peek {
        let exponent_sign = (ch == '-' || ch == '+') && matches!(num.chars().last(), Some('e' | 'E'));
        if ch.is_ascii_digit() || ch == '.' || ch == 'e' || ch == 'E' || exponent_sign {
            num.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    let digits = num.trim_start_matches(['-', '+']);
    let leading_zero = digits.starts_with('0') && digits[1..].starts_with(|c: char| c.is_ascii_digit());

    match num.parse::<f64>() {
        Ok(n) if n.is_finite() && !leading_zero => Ok(Token::Number(n)),
        Ok(_) if leading_zero => Err(invalid_number(num, line, column, "Leading zeros are not allowed")),
        Ok(_) => Err(invalid_number(num, line, column, "Number is out of range")),
        Err(_) => Err(invalid_number(num, line, column, "Numbers look like 42, -3.5 or 1e6")),
    }
}

fn invalid_number(text: String, line: usize, column: usize, hint: &str) -> AsonError {
    AsonError::InvalidNumber {
        text,
        line,
        column,
        hint: Some(hint.into()),
        code: Some(102),
    }
}

fn tokenize_identifier_or_keyword(lexer: &mut Lexer) -> Result<Token, AsonError> {
    let mut ident = String::new();

    while let Some(ch) = lexer.peek {
        if ch.is_alphanumeric() || ch == '_' {
            ident.push(ch);
            bump(lexer);
        } else {
            break;
        }
    }

    // Python-style constants are accepted alongside the JSON ones
    let token = match ident.as_str() {
        "true" | "True" => Token::Bool(true),
        "false" | "False" => Token::Bool(false),
        "null" | "None" => Token::Null,
        _ => Token::Ident(ident),
    };

    Ok(token)
}

fn tokenize_unexpected_char(lexer: &mut Lexer, ch: char) -> Result<Token, AsonError> {
    bump(lexer);
    Err(AsonError::UnexpectedCharacter {
        character: ch,
        line: lexer.line,
        column: lexer.column,
        hint: Some("Unexpected character in input".into()),
        code: Some(104),
    })
}
