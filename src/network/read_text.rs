use super::{Pore, PoreNetwork, Throat};
use crate::base::{PORE_FILE_HEADER_LINES, THROAT_FILE_HEADER_LINES};
use crate::StrError;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Parses a non-negative integer written as "3" or "3.0"
fn parse_index(token: &str) -> Option<usize> {
    if let Ok(value) = token.parse::<usize>() {
        return Some(value);
    }
    match token.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => Some(value as usize),
        _ => None,
    }
}

/// Returns the whitespace-separated tokens of each non-empty line after the header
fn data_rows(contents: &str, header_lines: usize) -> impl Iterator<Item = Vec<&str>> {
    contents
        .lines()
        .skip(header_lines)
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
}

impl PoreNetwork {
    /// Reads a pore network from a pore file and a throat file
    ///
    /// The pore file has 8 header lines followed by rows with 6 columns:
    /// id, x, y, z, radius, and grain type.
    ///
    /// The throat file has 5 header lines followed by rows with 3 columns:
    /// id, start pore id, and end pore id.
    ///
    /// Columns are separated by whitespace and empty lines are ignored. Any malformed
    /// row makes the whole reading fail.
    ///
    /// # Input
    ///
    /// * `pore_file` -- may be a String, &str, or Path
    /// * `throat_file` -- may be a String, &str, or Path
    pub fn read_text_files<P, Q>(pore_file: &P, throat_file: &Q) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
        Q: AsRef<OsStr> + ?Sized,
    {
        let pore_text = fs::read_to_string(Path::new(pore_file)).map_err(|_| "cannot read pore file")?;
        let throat_text = fs::read_to_string(Path::new(throat_file)).map_err(|_| "cannot read throat file")?;
        PoreNetwork::from_text(&pore_text, &throat_text)
    }

    /// Parses the contents of a pore file and a throat file
    ///
    /// See [PoreNetwork::read_text_files] for the format.
    pub fn from_text(pore_text: &str, throat_text: &str) -> Result<Self, StrError> {
        let mut pores = Vec::new();
        for tokens in data_rows(pore_text, PORE_FILE_HEADER_LINES) {
            if tokens.len() != 6 {
                return Err("pore file rows must have 6 columns: id, x, y, z, radius, grain");
            }
            let id = parse_index(tokens[0]).ok_or("pore file has an invalid pore id")?;
            let mut values = [0.0; 4];
            for (value, token) in values.iter_mut().zip(&tokens[1..5]) {
                *value = token.parse().map_err(|_| "pore file has an invalid number")?;
            }
            let grain = parse_index(tokens[5]).ok_or("pore file has an invalid grain type")?;
            pores.push(Pore::new(id, values[0], values[1], values[2], values[3], grain));
        }
        let mut throats = Vec::new();
        for tokens in data_rows(throat_text, THROAT_FILE_HEADER_LINES) {
            if tokens.len() != 3 {
                return Err("throat file rows must have 3 columns: id, start, end");
            }
            let id = parse_index(tokens[0]).ok_or("throat file has an invalid throat id")?;
            let start = parse_index(tokens[1]).ok_or("throat file has an invalid pore id")?;
            let end = parse_index(tokens[2]).ok_or("throat file has an invalid pore id")?;
            throats.push(Throat { id, start, end });
        }
        PoreNetwork::new(pores, throats)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::parse_index;
    use crate::network::PoreNetwork;
    use crate::StrError;

    const PORE_HEADER: &str = "h1\nh2\nh3\nh4\nh5\nh6\nh7\nh8\n";
    const THROAT_HEADER: &str = "h1\nh2\nh3\nh4\nh5\n";

    #[test]
    fn parse_index_works() {
        assert_eq!(parse_index("3"), Some(3));
        assert_eq!(parse_index("3.0"), Some(3));
        assert_eq!(parse_index("3.5"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("abc"), None);
    }

    #[test]
    fn from_text_works() -> Result<(), StrError> {
        let pores = format!(
            "{}1 0.0 0.0 0.0 0.5 1\n\n2 1.0 0.0 0.0 0.25 2\n3   1.0 1.0 2.0  0.125\t1\n",
            PORE_HEADER
        );
        let throats = format!("{}1 1 2\n2 2 3\n", THROAT_HEADER);
        let network = PoreNetwork::from_text(&pores, &throats)?;
        assert_eq!(network.len(), 3);
        assert_eq!(network.throats().len(), 2);
        assert_eq!(network.neighbor_ids(2)?, &[1, 3]);
        let p3 = network.pore_by_id(3)?;
        assert_eq!((p3.x, p3.y, p3.z, p3.radius, p3.grain), (1.0, 1.0, 2.0, 0.125, 1));
        Ok(())
    }

    #[test]
    fn from_text_captures_errors() {
        let throats = format!("{}1 1 2\n", THROAT_HEADER);
        let pores = format!("{}1 0.0 0.0 0.0 0.5\n", PORE_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &throats).err(),
            Some("pore file rows must have 6 columns: id, x, y, z, radius, grain")
        );
        let pores = format!("{}1 0.0 abc 0.0 0.5 1\n", PORE_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &throats).err(),
            Some("pore file has an invalid number")
        );
        let pores = format!("{}x 0.0 0.0 0.0 0.5 1\n", PORE_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &throats).err(),
            Some("pore file has an invalid pore id")
        );
        let pores = format!("{}1 0.0 0.0 0.0 0.5 -1\n", PORE_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &throats).err(),
            Some("pore file has an invalid grain type")
        );
        let pores = format!("{}1 0 0 0 0.5 1\n2 1 0 0 0.5 1\n", PORE_HEADER);
        let bad = format!("{}1 1 2 3\n", THROAT_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &bad).err(),
            Some("throat file rows must have 3 columns: id, start, end")
        );
        let bad = format!("{}1 1 two\n", THROAT_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &bad).err(),
            Some("throat file has an invalid pore id")
        );
        let bad = format!("{}1 1 7\n", THROAT_HEADER);
        assert_eq!(
            PoreNetwork::from_text(&pores, &bad).err(),
            Some("throat refers to a non-existent pore")
        );
    }

    #[test]
    fn read_text_files_captures_errors() {
        assert_eq!(
            PoreNetwork::read_text_files("/tmp/ipsim/__none__.txt", "data/networks/simple_throat.txt").err(),
            Some("cannot read pore file")
        );
        assert_eq!(
            PoreNetwork::read_text_files("data/networks/simple_pore.txt", "/tmp/ipsim/__none__.txt").err(),
            Some("cannot read throat file")
        );
    }

    #[test]
    fn read_text_files_works() -> Result<(), StrError> {
        let network = PoreNetwork::read_text_files("data/networks/simple_pore.txt", "data/networks/simple_throat.txt")?;
        assert_eq!(network.len(), 8);
        assert_eq!(network.throats().len(), 9);
        assert_eq!(network.neighbor_ids(1)?, &[2, 3]);
        assert_eq!(network.neighbor_ids(4)?, &[2, 3, 6]);
        Ok(())
    }
}
