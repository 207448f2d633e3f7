use chrono::NaiveDateTime;

use crate::media::{Kind, MediaFile};

/// The record currently holding an extremal timestamp, captured by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremum {
    pub name: String,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvolutionPeak {
    pub name: String,
    pub convolution: u32,
}

/// Running statistics over a set of records, built in a single pass.
///
/// Every comparison is strict, so on ties the first record seen is kept.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub min_access: Option<Extremum>,
    pub max_access: Option<Extremum>,
    pub min_modification: Option<Extremum>,
    pub max_modification: Option<Extremum>,
    pub min_change: Option<Extremum>,
    pub max_change: Option<Extremum>,
    /// Regular file with the largest convolution parsed from its source name
    pub max_convolution: Option<ConvolutionPeak>,
    /// Names of unclassified files, in encounter order
    pub unusual: Vec<String>,
    pub total: u64,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, file: &MediaFile) {
        self.total += 1;

        let t = &file.times;
        replace_if(&mut self.min_access, file, t.accessed, |new, cur| new < cur);
        replace_if(&mut self.max_access, file, t.accessed, |new, cur| new > cur);
        replace_if(&mut self.min_modification, file, t.modified, |new, cur| new < cur);
        replace_if(&mut self.max_modification, file, t.modified, |new, cur| new > cur);
        replace_if(&mut self.min_change, file, t.changed, |new, cur| new < cur);
        replace_if(&mut self.max_change, file, t.changed, |new, cur| new > cur);

        match &file.kind {
            Kind::Regular(r) => {
                let exceeds = self
                    .max_convolution
                    .as_ref()
                    .map_or(true, |peak| r.convolution > peak.convolution);
                if exceeds {
                    self.max_convolution = Some(ConvolutionPeak {
                        name: file.output_name(),
                        convolution: r.convolution,
                    });
                }
            }
            Kind::Unusual => self.unusual.push(file.filename.clone()),
        }
    }

    /// Pass every record through unchanged, observing each one on the way.
    pub fn perform<I>(&mut self, files: I) -> Analyzed<'_, I::IntoIter>
    where
        I: IntoIterator<Item = MediaFile>,
    {
        Analyzed {
            inner: files.into_iter(),
            analysis: self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn replace_if(
    slot: &mut Option<Extremum>,
    file: &MediaFile,
    at: NaiveDateTime,
    better: impl Fn(NaiveDateTime, NaiveDateTime) -> bool,
) {
    if slot.as_ref().map_or(true, |cur| better(at, cur.at)) {
        *slot = Some(Extremum {
            name: file.output_name(),
            at,
        });
    }
}

/// Iterator returned by [`Analysis::perform`].
pub struct Analyzed<'a, I> {
    inner: I,
    analysis: &'a mut Analysis,
}

impl<I> Iterator for Analyzed<'_, I>
where
    I: Iterator<Item = MediaFile>,
{
    type Item = MediaFile;

    fn next(&mut self) -> Option<MediaFile> {
        let file = self.inner.next()?;
        self.analysis.observe(&file);
        Some(file)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Timestamps;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn file(name: &str, accessed: u32, modified: u32, changed: u32) -> MediaFile {
        MediaFile::new(
            name,
            Timestamps {
                accessed: ts(accessed),
                modified: ts(modified),
                changed: ts(changed),
            },
        )
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = Analysis::new();
        assert!(analysis.is_empty());
        assert!(analysis.min_access.is_none());
        assert!(analysis.max_convolution.is_none());
    }

    #[test]
    fn test_extremes_per_timestamp_kind() {
        let files = vec![
            file("a.txt", 5, 9, 2),
            file("b.txt", 1, 3, 8),
            file("c.txt", 7, 6, 1),
        ];
        let mut analysis = Analysis::new();
        let out: Vec<MediaFile> = analysis.perform(files).collect();

        assert_eq!(out.len(), 3);
        assert_eq!(analysis.total, 3);
        assert_eq!(analysis.min_access.unwrap().name, "b.txt");
        assert_eq!(analysis.max_access.unwrap().name, "c.txt");
        assert_eq!(analysis.min_modification.unwrap().name, "b.txt");
        assert_eq!(analysis.max_modification.unwrap().name, "a.txt");
        assert_eq!(analysis.min_change.unwrap().name, "c.txt");
        assert_eq!(analysis.max_change.as_ref().unwrap().at, ts(8));
    }

    #[test]
    fn test_first_record_wins_ties() {
        let mut analysis = Analysis::new();
        for name in ["first.txt", "second.txt", "third.txt"] {
            analysis.observe(&file(name, 4, 4, 4));
        }
        for slot in [
            &analysis.min_access,
            &analysis.max_access,
            &analysis.min_modification,
            &analysis.max_modification,
            &analysis.min_change,
            &analysis.max_change,
        ] {
            assert_eq!(slot.as_ref().unwrap().name, "first.txt");
        }
    }

    #[test]
    fn test_unusual_and_convolution_tracking() {
        let files = vec![
            file("z.txt", 1, 1, 1),
            file("DSC_0001_2.JPG", 1, 1, 1),
            file("a.txt", 1, 1, 1),
            file("MOV_0001_5.mp4", 1, 1, 1),
            file("DSC_0002_5.JPG", 1, 1, 1),
            file("DSC_0003.JPG", 1, 1, 1),
        ];
        let mut analysis = Analysis::new();
        let passed: Vec<String> = analysis.perform(files).map(|f| f.filename).collect();

        assert_eq!(passed[0], "z.txt");
        assert_eq!(passed[5], "DSC_0003.JPG");
        assert_eq!(analysis.unusual, vec!["z.txt", "a.txt"]);
        let peak = analysis.max_convolution.unwrap();
        assert_eq!(peak.convolution, 5);
        assert_eq!(peak.name, "VID_20230301_120000_5.mp4");
    }

    #[test]
    fn test_perform_is_lazy() {
        let mut analysis = Analysis::new();
        {
            let mut iter = analysis.perform(vec![file("a.txt", 1, 1, 1), file("b.txt", 2, 2, 2)]);
            assert!(iter.next().is_some());
        }
        assert_eq!(analysis.total, 1);
    }
}
