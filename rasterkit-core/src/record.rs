/// Decoding of textual transform records such as `X,rd,Rz,75;`
use nalgebra::Matrix4;
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, opt},
    multi::many0,
    number::complete::double,
    sequence::{delimited, preceded},
    IResult,
};
use thiserror::Error;

use crate::transform::{compute_transformation, TransformOp};

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("unrecognized transform op `{0}`")]
    UnknownOp(String),
    #[error("transform op `{op}` expects {expected} argument(s), found {found}")]
    Arity {
        op: String,
        expected: usize,
        found: usize,
    },
    #[error("malformed transform record `{0}`")]
    Malformed(String),
}

/// A transform op addressed to a named scene object
#[derive(Debug, Clone, PartialEq)]
pub struct TransformRecord {
    pub object: String,
    pub op: TransformOp,
}

/// Build an op from its tag (`T`, `S`, `Rx`, `Ry`, `Rz`) and arguments
pub fn op_from_tag(tag: &str, args: &[f64]) -> Result<TransformOp, TransformError> {
    let expected = match tag {
        "T" | "S" => 3,
        "Rx" | "Ry" | "Rz" => 1,
        _ => return Err(TransformError::UnknownOp(tag.to_string())),
    };
    if args.len() != expected {
        return Err(TransformError::Arity {
            op: tag.to_string(),
            expected,
            found: args.len(),
        });
    }

    Ok(match tag {
        "T" => TransformOp::Translate(args[0], args[1], args[2]),
        "S" => TransformOp::Scale(args[0], args[1], args[2]),
        "Rx" => TransformOp::RotateX(args[0]),
        "Ry" => TransformOp::RotateY(args[0]),
        _ => TransformOp::RotateZ(args[0]),
    })
}

/// Parse one record, with or without its trailing `;`
pub fn parse_record(input: &str) -> Result<TransformRecord, TransformError> {
    let (_, (object, tag, args)) = all_consuming(record)(input)
        .map_err(|_| TransformError::Malformed(input.trim().to_string()))?;

    Ok(TransformRecord {
        object: object.to_string(),
        op: op_from_tag(tag, &args)?,
    })
}

/// Parse every `;`-terminated record in `input`.
///
/// Records are independent: one bad record does not affect the others.
pub fn parse_records(input: &str) -> Vec<Result<TransformRecord, TransformError>> {
    input
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(parse_record)
        .collect()
}

/// Compose, in order, the records of `input` addressed to `object`.
///
/// Records that fail to decode are reported and skipped; composition of
/// the remaining ops continues.
pub fn compose_records(input: &str, object: &str) -> Matrix4<f64> {
    let ops: Vec<TransformOp> = parse_records(input)
        .into_iter()
        .filter_map(|parsed| match parsed {
            Ok(record) if record.object == object => Some(record.op),
            Ok(_) => None,
            Err(e) => {
                log::warn!("skipping transform for `{}`: {}", object, e);
                None
            }
        })
        .collect();
    compute_transformation(&ops)
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn field(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ',' && c != ';' && !c.is_whitespace())(input)
}

fn record(input: &str) -> IResult<&str, (&str, &str, Vec<f64>)> {
    let (input, _) = preceded(multispace0, char('X'))(input)?;
    let (input, object) = preceded(separator, field)(input)?;
    let (input, tag) = preceded(separator, field)(input)?;
    let (input, args) = many0(preceded(separator, double))(input)?;
    let (input, _) = preceded(multispace0, opt(char(';')))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (object, tag, args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_rotation_record() {
        let record = parse_record("X,rd,Rz,75;").unwrap();
        assert_eq!(record.object, "rd");
        assert_eq!(record.op, TransformOp::RotateZ(75.0));
    }

    #[test]
    fn test_parse_translation_with_spaces() {
        let record = parse_record(" X, gl ,T, 0, 1.5 ,-2 ").unwrap();
        assert_eq!(record.object, "gl");
        assert_eq!(record.op, TransformOp::Translate(0.0, 1.5, -2.0));
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            parse_record("X,rd,Shear,1,2,3;"),
            Err(TransformError::UnknownOp("Shear".to_string()))
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            parse_record("X,rd,S,0.5;"),
            Err(TransformError::Arity {
                op: "S".to_string(),
                expected: 3,
                found: 1
            })
        );
    }

    #[test]
    fn test_malformed_record() {
        assert!(matches!(
            parse_record("o,rd,unitCube,redDiceMat;"),
            Err(TransformError::Malformed(_))
        ));
        assert!(matches!(
            parse_record("X,rd,Rz,abc;"),
            Err(TransformError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_records_line() {
        let parsed = parse_records("X,rd,Rz,75;X,rd,Rx,90;X,rd,S,0.5,0.5,0.5;X,rd,T,-1,0,2;");
        let ops: Vec<_> = parsed.into_iter().map(|r| r.unwrap().op).collect();
        assert_eq!(
            ops,
            vec![
                TransformOp::RotateZ(75.0),
                TransformOp::RotateX(90.0),
                TransformOp::Scale(0.5, 0.5, 0.5),
                TransformOp::Translate(-1.0, 0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_compose_filters_by_object() {
        let input = "X,gd,Ry,45;X,bd,T,9,9,9;\nX,gd,S,0.5,0.5,0.5;X,gd,T,2,0,2;";
        let expected = Transform::translation_matrix(2.0, 0.0, 2.0)
            * Transform::scale_matrix(0.5, 0.5, 0.5)
            * Transform::rotation_y(45.0);
        assert_relative_eq!(compose_records(input, "gd"), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_skips_unknown_ops() {
        let with_bad = "X,a,S,2,2,2;X,a,Wobble,3;X,a,T,1,0,0;";
        let clean = "X,a,S,2,2,2;X,a,T,1,0,0;";
        assert_eq!(compose_records(with_bad, "a"), compose_records(clean, "a"));
        assert_eq!(compose_records("X,a,Wobble,3;", "a"), Matrix4::identity());
    }
}
