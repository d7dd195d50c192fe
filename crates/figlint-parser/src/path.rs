//! Grammar for SVG path data and point lists.
//!
//! Path data is parsed into [`Command`]s with `winnow` and then flattened
//! into straight segments. Curves and arcs contribute the chord from their
//! start to their end point, which is all the collision rules look at.

use winnow::{
    ModalResult, Parser as _,
    ascii::{float, multispace0},
    combinator::{cut_err, opt, preceded, repeat, terminated},
    token::one_of,
};

use figlint_core::geometry::{Point, Segment};

const COMMAND_LETTERS: &str = "MmLlHhVvZzCcSsQqTtAa";

/// A path command with its flattened argument list.
///
/// Repeated argument groups (`L 1 2 3 4`) stay in one command.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Command {
    letter: char,
    args: Vec<f32>,
}

/// Byte offset into the attribute value where parsing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub offset: usize,
}

/// Number of arguments in one group of the (uppercase) command.
fn arity(letter: char) -> usize {
    match letter {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

/// Optional whitespace with at most one comma.
fn separator(input: &mut &str) -> ModalResult<()> {
    (multispace0, opt(','), multispace0)
        .void()
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<f32> {
    preceded(separator, float).parse_next(input)
}

/// Arc flags are single characters and may be written without separators.
fn flag(input: &mut &str) -> ModalResult<f32> {
    preceded(separator, one_of(['0', '1']))
        .map(|c: char| if c == '1' { 1.0 } else { 0.0 })
        .parse_next(input)
}

fn arc_arguments(input: &mut &str) -> ModalResult<[f32; 7]> {
    (number, number, number, flag, flag, number, number)
        .map(|(rx, ry, rotation, large, sweep, x, y)| [rx, ry, rotation, large, sweep, x, y])
        .parse_next(input)
}

fn coordinate_group(count: usize) -> impl FnMut(&mut &str) -> ModalResult<Vec<f32>> {
    move |input: &mut &str| repeat(count, number).parse_next(input)
}

fn command(input: &mut &str) -> ModalResult<Command> {
    let letter = preceded(
        multispace0,
        one_of(|c: char| COMMAND_LETTERS.contains(c)),
    )
    .parse_next(input)?;

    // A command letter commits: missing or malformed arguments are fatal
    let args = match letter.to_ascii_uppercase() {
        'Z' => Vec::new(),
        'A' => cut_err(repeat(1.., arc_arguments).fold(
            Vec::new,
            |mut acc: Vec<f32>, group: [f32; 7]| {
                acc.extend(group);
                acc
            },
        ))
        .parse_next(input)?,
        upper => cut_err(repeat(1.., coordinate_group(arity(upper))).fold(
            Vec::new,
            |mut acc: Vec<f32>, group: Vec<f32>| {
                acc.extend(group);
                acc
            },
        ))
        .parse_next(input)?,
    };

    Ok(Command { letter, args })
}

fn path_data(input: &mut &str) -> ModalResult<Vec<Command>> {
    terminated(repeat(0.., command), multispace0).parse_next(input)
}

fn number_list(input: &mut &str) -> ModalResult<Vec<f32>> {
    terminated(repeat(0.., number), multispace0).parse_next(input)
}

/// Parses the `d` attribute of a `<path>` into commands.
pub(crate) fn parse_commands(data: &str) -> Result<Vec<Command>, SyntaxError> {
    path_data.parse(data).map_err(|err| SyntaxError {
        offset: err.offset(),
    })
}

/// Parses a path and flattens it into straight segments.
pub(crate) fn parse_path(data: &str) -> Result<Vec<Segment>, SyntaxError> {
    parse_commands(data).map(|commands| flatten(&commands))
}

/// Parses a `points` attribute into coordinate pairs.
pub(crate) fn parse_points(data: &str) -> Result<Vec<Point>, SyntaxError> {
    let numbers = number_list.parse(data).map_err(|err| SyntaxError {
        offset: err.offset(),
    })?;
    if numbers.len() % 2 != 0 {
        return Err(SyntaxError {
            offset: data.trim_end().len(),
        });
    }
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// Turns commands into straight segments, one per drawing step.
pub(crate) fn flatten(commands: &[Command]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = Point::default();

    for command in commands {
        let upper = command.letter.to_ascii_uppercase();
        let relative = command.letter.is_ascii_lowercase();

        if upper == 'Z' {
            if current != subpath_start {
                segments.push(Segment::new(current, subpath_start));
            }
            current = subpath_start;
            continue;
        }

        // Relative coordinates are offsets from the current point
        let resolve = |current: Point, x: f32, y: f32| {
            if relative {
                current.add_point(Point::new(x, y))
            } else {
                Point::new(x, y)
            }
        };

        for (index, group) in command.args.chunks_exact(arity(upper)).enumerate() {
            let target = match upper {
                'H' => Point::new(
                    if relative { current.x() + group[0] } else { group[0] },
                    current.y(),
                ),
                'V' => Point::new(
                    current.x(),
                    if relative { current.y() + group[0] } else { group[0] },
                ),
                _ => {
                    let n = group.len();
                    resolve(current, group[n - 2], group[n - 1])
                }
            };

            // Pairs after the first in a moveto are implicit linetos
            if upper == 'M' && index == 0 {
                subpath_start = target;
            } else {
                segments.push(Segment::new(current, target));
            }
            current = target;
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_absolute_lines() {
        let segments = parse_path("M 10 20 L 30 20 L 30 40").unwrap();
        assert_eq!(segments, [seg(10.0, 20.0, 30.0, 20.0), seg(30.0, 20.0, 30.0, 40.0)]);
    }

    #[test]
    fn test_relative_and_compact_syntax() {
        let segments = parse_path("m10,20l20-5h-10v10").unwrap();
        assert_eq!(
            segments,
            [
                seg(10.0, 20.0, 30.0, 15.0),
                seg(30.0, 15.0, 20.0, 15.0),
                seg(20.0, 15.0, 20.0, 25.0),
            ]
        );
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let segments = parse_path("M0 0 10 0 10 10").unwrap();
        assert_eq!(segments, [seg(0.0, 0.0, 10.0, 0.0), seg(10.0, 0.0, 10.0, 10.0)]);
    }

    #[test]
    fn test_close_path() {
        let segments = parse_path("M0 0 H10 V10 Z").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2], seg(10.0, 10.0, 0.0, 0.0));

        // Already closed: no zero-length closing segment
        let closed = parse_path("M0 0 L10 0 L0 0 Z").unwrap();
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn test_curves_contribute_chords() {
        let segments = parse_path("M0 0 C 10 -10 20 -10 30 0 S 50 10 60 0 Q 70 -5 80 0 T 100 0").unwrap();
        assert_eq!(
            segments,
            [
                seg(0.0, 0.0, 30.0, 0.0),
                seg(30.0, 0.0, 60.0, 0.0),
                seg(60.0, 0.0, 80.0, 0.0),
                seg(80.0, 0.0, 100.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_arc_with_compact_flags() {
        let segments = parse_path("M10 10 a5 5 0 0110 0").unwrap();
        assert_eq!(segments, [seg(10.0, 10.0, 20.0, 10.0)]);

        let spaced = parse_path("M10 10 A 5 5 30 1 0 40 10").unwrap();
        assert_eq!(spaced, [seg(10.0, 10.0, 40.0, 10.0)]);
    }

    #[test]
    fn test_exponents_and_decimals() {
        let segments = parse_path("M.5.5L1e1,2.5").unwrap();
        assert_eq!(segments, [seg(0.5, 0.5, 10.0, 2.5)]);
    }

    #[test]
    fn test_empty_path() {
        assert!(parse_path("").unwrap().is_empty());
        assert!(parse_path("   ").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_path_reports_offset() {
        let err = parse_path("M 0 0 L 10 X").unwrap_err();
        assert!(err.offset >= 8, "offset {} should point past `L`", err.offset);

        assert!(parse_path("M 0 0 L 10").is_err());
        assert!(parse_path("hello").is_err());
    }

    #[test]
    fn test_points() {
        let points = parse_points("0,0 10,3.5 0 7").unwrap();
        assert_eq!(
            points,
            [Point::new(0.0, 0.0), Point::new(10.0, 3.5), Point::new(0.0, 7.0)]
        );
        assert!(parse_points("").unwrap().is_empty());
    }

    #[test]
    fn test_points_errors() {
        assert!(parse_points("0,0 10").is_err());
        assert!(parse_points("0,0 ten,3").is_err());
    }
}
