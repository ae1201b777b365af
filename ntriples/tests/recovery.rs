use log::{Level, LevelFilter, Metadata, Record};
use ntio_api::parser::*;
use ntio_ntriples::*;
use std::error::Error;
use std::fmt;
use std::io::Cursor;
use std::sync::Mutex;

#[test]
fn strict_error_recovery() {
    let data = "<http://foo.com> <http://bar.com> <http://baz.com> .\n<http://foo.com> <http://bar.com> < .\n<http://foo.com> <http://bar.com> <http://bat.com> .\n<http://foo.com> <http://bar.com> \"bat .\n<http://foo.com> <http://bar.com> <http://bat.com> .";

    let mut count = 0;
    let mut count_err = 0;
    let mut parser = NTriplesParser::new(Cursor::new(&data));
    while !parser.is_end() {
        let step = parser.parse_step(&mut |_| {
            count += 1;
            Ok(()) as Result<(), NTriplesError>
        });
        if step.is_err() {
            count_err += 1;
        }
    }

    assert_eq!(count, 3);
    assert_eq!(count_err, 2);
}

#[test]
fn permissive_skips_offending_lines() -> Result<(), NTriplesError> {
    let data = "<http://foo.com> <http://bar.com> <http://baz.com> .\n<http://foo.com> <http://bar.com> < .\n<http://foo.com> <http://bar.com> <http://bat.com> .\n<http://foo.com> <http://bar.com> \"bat .\n<http://foo.com> <http://bar.com> <http://bat.com> .";
    let options = ParseOptions {
        policy: ErrorPolicy::Permissive,
        ..ParseOptions::default()
    };

    let mut count = 0;
    NTriplesParser::with_options(data.as_bytes(), options).parse_all(&mut |_| {
        count += 1;
        Ok(()) as Result<(), NTriplesError>
    })?;

    assert_eq!(3, count);
    Ok(())
}

#[test]
fn permissive_corrects_missing_full_stop() -> Result<(), NTriplesError> {
    let data = "<http://example.com/a> <http://example.com/p> \"1\"\n<http://example.com/a> <http://example.com/p> \"2\" .";
    let options = ParseOptions {
        policy: ErrorPolicy::Permissive,
        ..ParseOptions::default()
    };

    let mut objects = Vec::new();
    NTriplesParser::with_options(data.as_bytes(), options).parse_all(&mut |t| {
        objects.push(t.object.to_string());
        Ok(()) as Result<(), NTriplesError>
    })?;
    assert_eq!(objects, ["\"1\"", "\"2\""]);

    let err = NTriplesParser::new(data.as_bytes())
        .parse_all(&mut |_| Ok(()) as Result<(), NTriplesError>)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        NTriplesErrorKind::Grammar(GrammarViolation::MissingFullStop)
    ));
    Ok(())
}

#[test]
fn permissive_corrects_comment_tail() -> Result<(), NTriplesError> {
    let data = "<http://example.com/a> <http://example.com/p> \"1\" # note\n";
    let options = ParseOptions {
        policy: ErrorPolicy::Permissive,
        ..ParseOptions::default()
    };

    let mut count = 0;
    NTriplesParser::with_options(data.as_bytes(), options).parse_all(&mut |_| {
        count += 1;
        Ok(()) as Result<(), NTriplesError>
    })?;
    assert_eq!(1, count);

    let err = NTriplesParser::new(data.as_bytes())
        .parse_all(&mut |_| Ok(()) as Result<(), NTriplesError>)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        NTriplesErrorKind::Grammar(GrammarViolation::MissingFullStop)
    ));
    Ok(())
}

#[test]
fn trailing_garbage_is_never_corrected() -> Result<(), NTriplesError> {
    let data = "<http://example.com/a> <http://example.com/p> \"1\" . junk\n<http://example.com/b> <http://example.com/p> \"2\" .";
    let options = ParseOptions {
        policy: ErrorPolicy::Permissive,
        ..ParseOptions::default()
    };

    let mut subjects = Vec::new();
    NTriplesParser::with_options(data.as_bytes(), options).parse_all(&mut |t| {
        subjects.push(t.subject.to_string());
        Ok(()) as Result<(), NTriplesError>
    })?;
    assert_eq!(subjects, ["<http://example.com/b>"]);

    let err = NTriplesParser::new(data.as_bytes())
        .parse_all(&mut |_| Ok(()) as Result<(), NTriplesError>)
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        NTriplesErrorKind::Grammar(GrammarViolation::TrailingGarbage)
    ));
    Ok(())
}

#[test]
fn strict_errors_cite_the_offending_line() {
    let data = "<http://example.com/a> <http://example.com/p> \"1\" .\n<http://example.com/a> <http://example.com/p> junk .";

    let err = NTriplesParser::new(data.as_bytes())
        .parse_all(&mut |_| Ok(()) as Result<(), NTriplesError>)
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        NTriplesErrorKind::Grammar(GrammarViolation::ObjectType)
    ));
    let line = err.offending_line().expect("no line information");
    assert_eq!(2, line.line_number());
    assert_eq!("<http://example.com/a> <http://example.com/p> junk .", line.text());
    assert!(err.to_string().contains("on line 2"));
}

#[test]
fn invalid_utf8_is_fatal_under_permissive() {
    let data = b"<http://a> <http://b> \"\xFF\" .\n<http://a> <http://b> \"ok\" .";
    let options = ParseOptions {
        policy: ErrorPolicy::Permissive,
        ..ParseOptions::default()
    };

    let mut count = 0;
    let err = NTriplesParser::with_options(data.as_ref(), options)
        .parse_all(&mut |_| {
            count += 1;
            Ok(()) as Result<(), NTriplesError>
        })
        .unwrap_err();

    assert!(matches!(err.kind(), NTriplesErrorKind::InvalidUtf8(_)));
    assert_eq!(0, count);
}

#[derive(Debug)]
enum SinkError {
    Full,
    Parse(NTriplesError),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Full => write!(f, "sink is full"),
            SinkError::Parse(error) => error.fmt(f),
        }
    }
}

impl Error for SinkError {}

impl From<NTriplesError> for SinkError {
    fn from(error: NTriplesError) -> Self {
        SinkError::Parse(error)
    }
}

#[test]
fn sink_errors_are_not_intercepted() {
    let data = "<http://example.com/a> <http://example.com/p> \"1\" .\n<http://example.com/a> <http://example.com/p> \"2\" .\n<http://example.com/a> <http://example.com/p> \"3\" .";

    for policy in &[ErrorPolicy::Strict, ErrorPolicy::Permissive] {
        let options = ParseOptions {
            policy: *policy,
            ..ParseOptions::default()
        };
        let mut count = 0;
        let result = NTriplesParser::with_options(data.as_bytes(), options).parse_all(&mut |_| {
            count += 1;
            if count == 2 {
                Err(SinkError::Full)
            } else {
                Ok(())
            }
        });

        assert!(matches!(result, Err(SinkError::Full)));
        assert_eq!(2, count);
    }
}

static LOGGER: WarningCollector = WarningCollector;
static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct WarningCollector;

impl log::Log for WarningCollector {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            WARNINGS.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

#[test]
fn permissive_mode_logs_warnings() -> Result<(), NTriplesError> {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Warn);

    // URIs of this document mark its warnings, other tests log concurrently
    let data = "<http://marker.example/a> <http://marker.example/p> \"1\"\n<http://marker.example/a> <http://marker.example/p> \"2\" . junk\n<http://marker.example/a> <http://marker.example/p> \"3\" # note";
    let options = ParseOptions {
        policy: ErrorPolicy::Permissive,
        ..ParseOptions::default()
    };

    let mut count = 0;
    NTriplesParser::with_options(data.as_bytes(), options).parse_all(&mut |_| {
        count += 1;
        Ok(()) as Result<(), NTriplesError>
    })?;
    assert_eq!(2, count);

    let warnings: Vec<String> = WARNINGS
        .lock()
        .unwrap()
        .iter()
        .filter(|w| w.contains("http://marker.example"))
        .cloned()
        .collect();
    assert_eq!(3, warnings.len());
    assert!(warnings.iter().any(|w| w.contains("missing full stop on line 1")));
    assert!(warnings
        .iter()
        .any(|w| w.contains("on line 2") && w.contains("line skipped")));
    assert!(warnings
        .iter()
        .any(|w| w.contains("extra characters after the statement on line 3")));
    Ok(())
}
