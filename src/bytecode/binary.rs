/*!
  Programs are stored as text, one byte per line, each written as a binary literal:

  ```text
  10000010 # LDI R0,8
  00000000
  00001000

  10100111 # CMP
  ```

  Anything from a `#` to the end of the line is a comment. Blank and comment-only lines do not
  produce a byte. A literal may carry a `0b` prefix and must fit in 8 bits.
*/

use nom::{
  bytes::complete::{tag, take_while1},
  character::complete::{char as one_char, space0},
  combinator::{eof, map_res, opt, rest},
  sequence::{delimited, pair, preceded, terminated},
  IResult
};

use crate::error::LoadError;
use crate::memory::Byte;

fn binary_literal(input: &str) -> IResult<&str, Byte> {
  map_res(
    preceded(opt(tag("0b")), take_while1(|c: char| c == '0' || c == '1')),
    |digits: &str| Byte::from_str_radix(digits, 2)
  )(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
  preceded(one_char('#'), rest)(input)
}

/// A whole line: an optional literal, optional comment, nothing else.
fn program_line(input: &str) -> IResult<&str, Option<Byte>> {
  terminated(
    delimited(space0, opt(binary_literal), space0),
    pair(opt(comment), eof)
  )(input)
}

/**
  Parses program text into the byte image it describes, in file order. Line numbers in errors
  count from 1.
*/
pub fn parse_program_text(text: &str) -> Result<Vec<Byte>, LoadError> {
  let mut image = Vec::new();

  for (index, line) in text.lines().enumerate() {
    match program_line(line) {

      Ok((_, Some(byte))) => image.push(byte),

      Ok((_, None))       => continue,

      Err(_) => {
        return Err(LoadError::MalformedInstruction {
          line : index + 1,
          text : line.trim().to_string()
        });
      }

    }
  }

  Ok(image)
}
