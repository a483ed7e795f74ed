use super::*;
use crate::ast::Mapping;

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, AsonError> {
    match parser.peek() {
        Some(Token::LBrace) => Ok(Value::Object(parse_object(parser)?)),
        Some(Token::LBracket) => parse_array_value(parser),
        Some(Token::String(_)) => parse_string_value(parser),
        Some(Token::Number(_)) => parse_number_value(parser),
        Some(Token::Bool(_)) => parse_bool_value(parser),
        Some(Token::Null) => parse_null_value(parser),
        Some(Token::Eof) | None => Err(parser.eof_error("Expected a value")),
        Some(Token::Ident(name)) => Err(AsonError::InvalidToken {
            token: name.clone(),
            line: parser.line(),
            column: parser.column(),
            hint: Some("Bare words are not values; quote strings and use true, false or null".into()),
            code: Some(210),
        }),
        _ => {
            let token = parser.bump()?;
            Err(AsonError::InvalidToken {
                token: format!("{:?}", token),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Unexpected token in value position".into()),
                code: Some(210),
            })
        }
    }
}

/// `{ "key": value, ... }`. A repeated key keeps its first position and takes the last value.
pub(super) fn parse_object(parser: &mut Parser) -> Result<Mapping, AsonError> {
    parser.expect(Token::LBrace)?;
    parser.enter()?;
    let mut items = Mapping::new();

    loop {
        match parser.bump()? {
            Token::RBrace => break,
            Token::String(key) => {
                parser.expect(Token::Colon)?;
                let value = parse_value(parser)?;
                items.insert(key, value);

                match parser.bump()? {
                    Token::Comma => continue,
                    Token::RBrace => break,
                    Token::Eof => return Err(parser.eof_error("Unclosed mapping")),
                    other => {
                        return Err(AsonError::InvalidToken {
                            token: format!("{:?}", other),
                            line: parser.line(),
                            column: parser.column(),
                            hint: Some("Expected ',' or '}' after a mapping entry".into()),
                            code: Some(207),
                        });
                    }
                }
            }
            Token::Eof => return Err(parser.eof_error("Unclosed mapping")),
            other => {
                return Err(AsonError::InvalidToken {
                    token: format!("{:?}", other),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Mapping keys must be quoted strings".into()),
                    code: Some(208),
                });
            }
        }
    }

    parser.leave();
    Ok(items)
}

fn parse_array_value(parser: &mut Parser) -> Result<Value, AsonError> {
    parser.expect(Token::LBracket)?;
    parser.enter()?;
    let mut arr = Vec::new();

    loop {
        if let Some(Token::RBracket) = parser.peek() {
            parser.bump()?;
            break;
        }

        arr.push(parse_value(parser)?);

        match parser.bump()? {
            Token::Comma => continue,
            Token::RBracket => break,
            Token::Eof => return Err(parser.eof_error("Unclosed sequence")),
            other => {
                return Err(AsonError::InvalidToken {
                    token: format!("{:?}", other),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected ',' or ']' after a sequence element".into()),
                    code: Some(209),
                });
            }
        }
    }

    parser.leave();
    Ok(Value::Array(arr))
}

fn parse_string_value(parser: &mut Parser) -> Result<Value, AsonError> {
    if let Token::String(s) = parser.bump()? {
        Ok(Value::String(s))
    } else {
        unreachable!()
    }
}

fn parse_number_value(parser: &mut Parser) -> Result<Value, AsonError> {
    if let Token::Number(n) = parser.bump()? {
        Ok(Value::Number(n))
    } else {
        unreachable!()
    }
}

fn parse_bool_value(parser: &mut Parser) -> Result<Value, AsonError> {
    if let Token::Bool(b) = parser.bump()? {
        Ok(Value::Bool(b))
    } else {
        unreachable!()
    }
}

fn parse_null_value(parser: &mut Parser) -> Result<Value, AsonError> {
    parser.bump()?; // consume Null
    Ok(Value::Null)
}
