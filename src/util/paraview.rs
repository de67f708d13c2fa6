use crate::network::PoreNetwork;
use crate::sim::Results;
use crate::StrError;
use std::ffi::OsStr;
use std::fmt::Write;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::Path;

/// VTK cell type of a single point
const VTK_VERTEX: usize = 1;

/// VTK cell type of a segment
const VTK_LINE: usize = 3;

/// Writes Paraview's VTU file with the pores (vertices) and the throats (lines)
///
/// The point data are: radius, pt, occupy, start, end, and iteration. The iteration
/// is the invasion step of each pore or -1 if the pore has not been invaded (or if
/// `results` is None).
///
/// # Input
///
/// * `network` -- the pore network
/// * `results` -- the invasion sequence, if available
/// * `full_path` -- may be a String, &str, or Path
pub fn paraview_write_vtu<P>(network: &PoreNetwork, results: Option<&Results>, full_path: &P) -> Result<(), StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let npore = network.len();
    if npore < 1 {
        return Err("there are no pores to write");
    }

    // unique connections (i < j)
    let mut lines = Vec::new();
    for i in 0..npore {
        for j in network.adjacency(i) {
            if i < *j {
                lines.push((i, *j));
            }
        }
    }
    let ncell = npore + lines.len();

    // output buffer
    let mut buffer = String::new();

    // header
    write!(
        &mut buffer,
        "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <UnstructuredGrid>\n\
             <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">\n",
        npore, ncell
    )
    .unwrap();

    // nodes: coordinates
    write!(
        &mut buffer,
        "<Points>\n\
             <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">\n",
    )
    .unwrap();
    for pore in network.pores() {
        write!(&mut buffer, "{:?} {:?} {:?} ", pore.x, pore.y, pore.z).unwrap();
    }
    write!(
        &mut buffer,
        "\n</DataArray>\n\
             </Points>\n"
    )
    .unwrap();

    // cells: connectivity
    write!(
        &mut buffer,
        "<Cells>\n\
             <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n"
    )
    .unwrap();
    for index in 0..npore {
        write!(&mut buffer, "{} ", index).unwrap();
    }
    for (a, b) in &lines {
        write!(&mut buffer, "{} {} ", a, b).unwrap();
    }

    // cells: offsets
    write!(
        &mut buffer,
        "\n</DataArray>\n\
             <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n"
    )
    .unwrap();
    for index in 0..npore {
        write!(&mut buffer, "{} ", index + 1).unwrap();
    }
    for k in 0..lines.len() {
        write!(&mut buffer, "{} ", npore + 2 * (k + 1)).unwrap();
    }

    // cells: types
    write!(
        &mut buffer,
        "\n</DataArray>\n\
             <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n"
    )
    .unwrap();
    for _ in 0..npore {
        write!(&mut buffer, "{} ", VTK_VERTEX).unwrap();
    }
    for _ in 0..lines.len() {
        write!(&mut buffer, "{} ", VTK_LINE).unwrap();
    }
    write!(
        &mut buffer,
        "\n</DataArray>\n\
             </Cells>\n"
    )
    .unwrap();

    // data: points
    write!(&mut buffer, "<PointData Scalars=\"TheScalars\">\n").unwrap();
    let mut float_array = |name: &str, values: Vec<f64>| {
        write!(
            &mut buffer,
            "<DataArray type=\"Float64\" Name=\"{}\" NumberOfComponents=\"1\" format=\"ascii\">\n",
            name
        )
        .unwrap();
        for value in values {
            write!(&mut buffer, "{:?} ", value).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n").unwrap();
    };
    float_array("radius", network.pores().iter().map(|p| p.radius).collect());
    float_array("pt", network.pores().iter().map(|p| p.pt).collect());
    let mut int_array = |name: &str, values: Vec<i64>| {
        write!(
            &mut buffer,
            "<DataArray type=\"Int32\" Name=\"{}\" NumberOfComponents=\"1\" format=\"ascii\">\n",
            name
        )
        .unwrap();
        for value in values {
            write!(&mut buffer, "{} ", value).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n").unwrap();
    };
    int_array("occupy", network.pores().iter().map(|p| p.occupy() as i64).collect());
    int_array("start", network.pores().iter().map(|p| p.start as i64).collect());
    int_array("end", network.pores().iter().map(|p| p.end as i64).collect());
    let iterations = results.map(|r| r.iterations()).unwrap_or_default();
    int_array(
        "iteration",
        network
            .pores()
            .iter()
            .map(|p| match iterations.get(&p.id) {
                Some(iteration) => *iteration as i64,
                None => -1,
            })
            .collect(),
    );
    write!(&mut buffer, "</PointData>\n").unwrap();

    // footer
    write!(
        &mut buffer,
        "</Piece>\n\
             </UnstructuredGrid>\n\
             </VTKFile>\n"
    )
    .unwrap();

    // create directory
    let path = Path::new(full_path);
    if let Some(p) = path.parent() {
        fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
    }

    // write file
    let mut file = File::create(path).map_err(|_| "cannot create file")?;
    file.write_all(buffer.as_bytes()).map_err(|_| "cannot write file")?;
    file.sync_all().map_err(|_| "cannot sync file")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
