//! Synthetic training data.
//!
//! Each label has a fixed sensor profile:
//!
//! | Label | IR | RF | EM | Vibration |
//! |-------|----|----|----|-----------|
//! | real | 0.6–1.0 | 0.5–1.0 | 0.5–1.0 | 1 |
//! | fake | 0 | 0 | 0 | 0 |
//! | inactive | 0.1–0.3 | 0 | 0.1–0.4 | 0 |
//!
//! Rows are stored as CSV with the header `IR,RF,EM,Vibration,Label`.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rand::Rng;
use tracing::info;
use vastav_sensors::{ThreatReading, FEATURE_NAMES};

use crate::{ClassifierError, Label, Result};

/// CSV header line.
pub const CSV_HEADER: &str = "IR,RF,EM,Vibration,Label";

/// One labelled row of training data.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub reading: ThreatReading,
    pub label: Label,
}

/// Draws `count` samples with uniformly chosen labels.
pub fn generate_dataset<R: Rng>(count: usize, rng: &mut R) -> Vec<TrainingSample> {
    (0..count)
        .map(|_| {
            let label = Label::ALL[rng.gen_range(0..Label::ALL.len())];
            sample_for(label, rng)
        })
        .collect()
}

/// Draws one sample matching the profile of `label`.
pub fn sample_for<R: Rng>(label: Label, rng: &mut R) -> TrainingSample {
    let reading = match label {
        Label::Real => ThreatReading {
            ir: draw(rng, 0.6, 1.0),
            rf: draw(rng, 0.5, 1.0),
            em: draw(rng, 0.5, 1.0),
            vibration: true,
        },
        Label::Fake => ThreatReading {
            ir: 0.0,
            rf: 0.0,
            em: 0.0,
            vibration: false,
        },
        Label::Inactive => ThreatReading {
            ir: draw(rng, 0.1, 0.3),
            rf: 0.0,
            em: draw(rng, 0.1, 0.4),
            vibration: false,
        },
    };
    TrainingSample { reading, label }
}

fn draw<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    (rng.gen_range(low..=high) * 100.0).round() / 100.0
}

/// Writes `samples` as CSV to `writer`.
///
/// Feature columns always carry a decimal point (`0.0`, not `0`); vibration
/// is written as `0`/`1`.
pub fn write_csv<W: Write>(writer: W, samples: &[TrainingSample]) -> Result<()> {
    let mut out = BufWriter::new(writer);
    writeln!(out, "{}", CSV_HEADER)?;
    for s in samples {
        writeln!(
            out,
            "{:?},{:?},{:?},{},{}",
            s.reading.ir,
            s.reading.rf,
            s.reading.em,
            u8::from(s.reading.vibration),
            s.label
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Parses CSV produced by [`write_csv`] (or any file with the same header).
///
/// Blank lines are skipped. Any malformed row fails the whole read.
pub fn read_csv<R: BufRead>(reader: R) -> Result<Vec<TrainingSample>> {
    let mut lines = reader.lines().enumerate();

    match lines.next() {
        Some((_, header)) => {
            let header = header?;
            let columns: Vec<&str> = header.trim().split(',').map(str::trim).collect();
            let expected: Vec<&str> = FEATURE_NAMES.iter().copied().chain(["Label"]).collect();
            if columns != expected {
                return Err(ClassifierError::Dataset {
                    line: 1,
                    reason: format!("expected header '{}', found '{}'", CSV_HEADER, header.trim()),
                });
            }
        }
        None => {
            return Err(ClassifierError::Dataset {
                line: 1,
                reason: "missing header".to_string(),
            })
        }
    }

    let mut samples = Vec::new();
    for (index, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        samples.push(parse_row(&line).map_err(|reason| ClassifierError::Dataset {
            line: index + 1,
            reason,
        })?);
    }
    Ok(samples)
}

fn parse_row(line: &str) -> std::result::Result<TrainingSample, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }

    let float = |i: usize| {
        fields[i]
            .parse::<f64>()
            .map_err(|e| format!("{}: '{}' ({})", FEATURE_NAMES[i], fields[i], e))
    };
    let vibration = match fields[3] {
        "0" => false,
        "1" => true,
        other => return Err(format!("Vibration must be 0 or 1, found '{}'", other)),
    };

    let reading = ThreatReading::new(float(0)?, float(1)?, float(2)?, vibration)
        .map_err(|e| e.to_string())?;
    let label = fields[4].parse::<Label>()?;
    Ok(TrainingSample { reading, label })
}

/// Writes `samples` to a CSV file, creating parent directories.
pub fn save<P: AsRef<Path>>(path: P, samples: &[TrainingSample]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_csv(fs::File::create(path)?, samples)?;
    info!(path = %path.display(), samples = samples.len(), "training data written");
    Ok(())
}

/// Reads a CSV training file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let file = fs::File::open(path.as_ref())?;
    read_csv(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_profiles() {
        let mut rng = StdRng::seed_from_u64(3);
        for s in generate_dataset(300, &mut rng) {
            let r = s.reading;
            match s.label {
                Label::Real => {
                    assert!(r.ir >= 0.6 && r.rf >= 0.5 && r.em >= 0.5 && r.vibration);
                }
                Label::Fake => {
                    assert_eq!(r.features(), [0.0, 0.0, 0.0, 0.0]);
                }
                Label::Inactive => {
                    assert!((0.1..=0.3).contains(&r.ir));
                    assert_eq!(r.rf, 0.0);
                    assert!((0.1..=0.4).contains(&r.em));
                    assert!(!r.vibration);
                }
            }
        }
    }

    #[test]
    fn test_all_labels_drawn() {
        let mut rng = StdRng::seed_from_u64(8);
        let samples = generate_dataset(100, &mut rng);
        for label in Label::ALL {
            assert!(samples.iter().any(|s| s.label == label), "no {} samples", label);
        }
    }

    #[test]
    fn test_csv_output_format() {
        let samples = vec![
            TrainingSample {
                reading: ThreatReading::new(0.8, 0.6, 0.7, true).unwrap(),
                label: Label::Real,
            },
            TrainingSample {
                reading: ThreatReading::new(0.0, 0.0, 0.0, false).unwrap(),
                label: Label::Fake,
            },
            TrainingSample {
                reading: ThreatReading::new(0.21, 0.0, 1.0, false).unwrap(),
                label: Label::Inactive,
            },
        ];
        let mut buf = Vec::new();
        write_csv(&mut buf, &samples).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "IR,RF,EM,Vibration,Label\n\
             0.8,0.6,0.7,1,real\n\
             0.0,0.0,0.0,0,fake\n\
             0.21,0.0,1.0,0,inactive\n"
        );
    }

    #[test]
    fn test_read_accepts_python_style_floats() {
        let csv = "IR,RF,EM,Vibration,Label\n0.0,0.0,0.0,0,fake\n0.21,0.0,0.33,0,inactive\n\n";
        let samples = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].label, Label::Inactive);
        assert_eq!(samples[1].reading.em, 0.33);
    }

    #[test]
    fn test_read_rejects_bad_header() {
        let err = read_csv("ir,rf,em,vib,label\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ClassifierError::Dataset { line: 1, .. }));
    }

    #[test]
    fn test_read_rejects_empty_input() {
        assert!(read_csv("".as_bytes()).is_err());
    }

    #[test]
    fn test_read_reports_line_number() {
        let csv = "IR,RF,EM,Vibration,Label\n0.1,0.2,0.3,0,fake\n0.1,0.2,0.3,2,fake\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        match err {
            ClassifierError::Dataset { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("Vibration"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_rejects_out_of_domain_value() {
        let csv = "IR,RF,EM,Vibration,Label\n1.4,0.2,0.3,1,real\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_read_rejects_unknown_label() {
        let csv = "IR,RF,EM,Vibration,Label\n0.1,0.2,0.3,1,bomb\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datasets/sensor_training.csv");
        let mut rng = StdRng::seed_from_u64(21);
        let samples = generate_dataset(40, &mut rng);

        save(&path, &samples).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, samples);
    }
}
