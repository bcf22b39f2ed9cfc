//! Four-file output writer (network, community, degree, community-size):
//! one `File::create`, one `BufWriter`, one `writeln!` per record.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use abcd_core::Edge;

/// Writes the network file: one edge per line, `a<TAB>b`, sorted
/// lexicographically ascending.
pub fn write_network_file(path: &Path, edges: &[Edge]) -> io::Result<()> {
    let mut sorted = edges.to_vec();
    sorted.sort_unstable();
    let mut writer = BufWriter::new(File::create(path)?);
    for (a, b) in sorted {
        writeln!(writer, "{a}\t{b}")?;
    }
    writer.flush()
}

/// Writes the community file: one vertex per line, `i<TAB>c`, in
/// vertex-index order. `clusters[i]` is the 1-based community of vertex
/// `i + 1`.
pub fn write_community_file(path: &Path, clusters: &[usize]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (i, &c) in clusters.iter().enumerate() {
        writeln!(writer, "{}\t{c}", i + 1)?;
    }
    writer.flush()
}

/// Writes a sequence file (degree or community-size): one integer per line.
pub fn write_sequence_file(path: &Path, values: &[u32]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in values {
        writeln!(writer, "{value}")?;
    }
    writer.flush()
}
