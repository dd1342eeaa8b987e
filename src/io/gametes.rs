use crate::error::Error;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Genotype state of a biallelic SNP.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum GenotypeState {
    DoubleMajor,
    Heterozygous,
    DoubleMinor,
}

impl GenotypeState {
    fn from_code(code: &str, line_ix: usize) -> Result<Self, Error> {
        match code {
            "0" => Ok(GenotypeState::DoubleMajor),
            "1" => Ok(GenotypeState::Heterozygous),
            "2" => Ok(GenotypeState::DoubleMinor),
            _ => Err(Error::GametesUnknownGenotypeCode {
                line_ix,
                code: code.to_owned(),
            }),
        }
    }

    pub fn one_hot_ix(&self) -> usize {
        match self {
            GenotypeState::DoubleMajor => 0,
            GenotypeState::Heterozygous => 1,
            GenotypeState::DoubleMinor => 2,
        }
    }
}

/// Case / control status of a sample.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum ClassStatus {
    Control,
    Case,
}

impl ClassStatus {
    fn from_code(code: &str, line_ix: usize) -> Result<Self, Error> {
        match code {
            "0" => Ok(ClassStatus::Control),
            "1" => Ok(ClassStatus::Case),
            _ => Err(Error::GametesUnknownClassCode {
                line_ix,
                code: code.to_owned(),
            }),
        }
    }

    pub fn one_hot_ix(&self) -> usize {
        match self {
            ClassStatus::Control => 0,
            ClassStatus::Case => 1,
        }
    }
}

/// Header line of a GAMETES file.
///
/// One attribute name per SNP column; the last column holds the class label.
/// GAMETES names predictive attributes M<model>P<locus> and noise attributes
/// N<k>.
#[derive(Clone, Debug)]
pub struct GametesHeader {
    attribute_names: Vec<String>,
}

impl GametesHeader {
    fn from_line(s: &str) -> Result<Self, Error> {
        let fields = s.split_whitespace().collect::<Vec<&str>>();
        if fields.len() < 2 {
            return Err(Error::GametesMissingHeader);
        }
        Ok(Self {
            attribute_names: fields[..fields.len() - 1]
                .iter()
                .map(|e| (*e).to_owned())
                .collect(),
        })
    }

    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    pub fn num_markers(&self) -> usize {
        self.attribute_names.len()
    }

    pub fn predictive_loci(&self) -> Vec<usize> {
        self.attribute_names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.starts_with('M') && name.contains('P'))
            .map(|(ix, _)| ix)
            .collect()
    }
}

/// Entry of a GAMETES file: one genotype code per SNP column, class label in
/// the last column.
#[derive(Debug)]
pub struct GametesRecord {
    pub ix: usize,
    pub genotypes: Vec<GenotypeState>,
    pub class: ClassStatus,
}

impl GametesRecord {
    fn from_line(s: &str, ix: usize, num_markers: usize) -> Result<Self, Error> {
        let fields = s.split_whitespace().collect::<Vec<&str>>();
        if fields.len() != num_markers + 1 {
            return Err(Error::GametesFieldCount {
                line_ix: ix,
                expected: num_markers + 1,
                found: fields.len(),
            });
        }
        let mut genotypes = Vec::with_capacity(num_markers);
        for field in &fields[..num_markers] {
            genotypes.push(GenotypeState::from_code(field, ix)?);
        }
        Ok(Self {
            ix,
            genotypes,
            class: ClassStatus::from_code(fields[num_markers], ix)?,
        })
    }
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<GametesHeader, Error> {
    let mut first_line = String::new();
    let bytes_read = reader.read_line(&mut first_line)?;
    if bytes_read == 0 {
        return Err(Error::GametesMissingHeader);
    }
    GametesHeader::from_line(&first_line)
}

fn read_record<R: BufRead>(
    reader: &mut R,
    buffer: &mut String,
    num_read: &mut usize,
    num_markers: usize,
) -> Result<Option<GametesRecord>, Error> {
    loop {
        buffer.clear();
        let bytes_read = reader.read_line(buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        // GAMETES files commonly end in a blank line
        if buffer.trim().is_empty() {
            continue;
        }
        let record = GametesRecord::from_line(buffer, *num_read, num_markers)?;
        *num_read += 1;
        return Ok(Some(record));
    }
}

pub trait GametesRead {
    fn header(&self) -> &GametesHeader;
    fn next_record(&mut self) -> Result<Option<GametesRecord>, Error>;
}

pub struct GametesReader {
    num_read: usize,
    header: GametesHeader,
    reader: BufReader<File>,
    buffer: String,
}

impl GametesReader {
    pub fn new(path: &Path) -> Result<Self, Error> {
        let mut reader = BufReader::new(File::open(path)?);
        let header = read_header(&mut reader)?;
        Ok(Self {
            num_read: 0,
            header,
            reader,
            buffer: String::new(),
        })
    }
}

impl GametesRead for GametesReader {
    fn header(&self) -> &GametesHeader {
        &self.header
    }

    fn next_record(&mut self) -> Result<Option<GametesRecord>, Error> {
        let num_markers = self.header.num_markers();
        read_record(
            &mut self.reader,
            &mut self.buffer,
            &mut self.num_read,
            num_markers,
        )
    }
}

pub struct GzGametesReader {
    num_read: usize,
    header: GametesHeader,
    reader: BufReader<GzDecoder<File>>,
    buffer: String,
}

impl GzGametesReader {
    pub fn new(path: &Path) -> Result<Self, Error> {
        let mut reader = BufReader::new(GzDecoder::new(File::open(path)?));
        let header = read_header(&mut reader)?;
        Ok(Self {
            num_read: 0,
            header,
            reader,
            buffer: String::new(),
        })
    }
}

impl GametesRead for GzGametesReader {
    fn header(&self) -> &GametesHeader {
        &self.header
    }

    fn next_record(&mut self) -> Result<Option<GametesRecord>, Error> {
        let num_markers = self.header.num_markers();
        read_record(
            &mut self.reader,
            &mut self.buffer,
            &mut self.num_read,
            num_markers,
        )
    }
}

pub fn open_gametes(path: &Path) -> Result<Box<dyn GametesRead>, Error> {
    match path.extension() {
        Some(ext) if ext == "gz" => Ok(Box::new(GzGametesReader::new(path)?)),
        _ => Ok(Box::new(GametesReader::new(path)?)),
    }
}

/// A fully read GAMETES file: raw genotype state codes in row major
/// [num_samples, num_markers] order plus the class column and header.
pub struct GametesDataset {
    header: GametesHeader,
    genotype_codes: Vec<u8>,
    classes: Vec<u8>,
    num_samples: usize,
}

impl GametesDataset {
    pub fn from_file(path: &Path, max_samples: Option<usize>) -> Result<Self, Error> {
        let mut reader = open_gametes(path)?;
        let mut genotype_codes = Vec::new();
        let mut classes = Vec::new();
        let mut num_samples = 0;
        while let Some(record) = reader.next_record()? {
            genotype_codes.extend(record.genotypes.iter().map(|g| g.one_hot_ix() as u8));
            classes.push(record.class.one_hot_ix() as u8);
            num_samples += 1;
            if let Some(max) = max_samples {
                if num_samples == max {
                    break;
                }
            }
        }
        let header = reader.header().clone();
        Ok(Self {
            header,
            genotype_codes,
            classes,
            num_samples,
        })
    }

    pub fn header(&self) -> &GametesHeader {
        &self.header
    }

    pub fn genotype_codes(&self) -> &[u8] {
        &self.genotype_codes
    }

    pub fn classes(&self) -> &[u8] {
        &self.classes
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn num_markers(&self) -> usize {
        self.header.num_markers()
    }
}
