use ipsim::model::PressureModel;
use ipsim::network::{Grain, PoreNetwork, Radius};
use ipsim::sim::Simulation;
use ipsim::util::paraview_write_vtu;
use ipsim::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "ipsim_run",
    about = "Runs an invasion percolation simulation on a grid or on a network read from files"
)]
struct Options {
    /// Pore file (id, x, y, z, radius, grain); a grid is generated if not given
    #[structopt(long)]
    pore_file: Option<String>,

    /// Throat file (id, start, end)
    #[structopt(long)]
    throat_file: Option<String>,

    /// Multiplies the coordinates and radii read from files (e.g. 0.01 for cm → m)
    #[structopt(long, default_value = "1.0")]
    length_factor: f64,

    /// Added to the grain types read from files (e.g. -1 for one-based grains)
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    grain_offset: i64,

    /// Number of pores along x (grid)
    #[structopt(long, default_value = "10")]
    nx: usize,

    /// Number of pores along y (grid)
    #[structopt(long, default_value = "10")]
    ny: usize,

    /// Number of pores along z (grid)
    #[structopt(long, default_value = "10")]
    nz: usize,

    /// Spacing between pores (grid)
    #[structopt(long, default_value = "0.0005")]
    cell_size: f64,

    /// Mean pore radius (grid)
    #[structopt(long, default_value = "0.0002")]
    radius_mean: f64,

    /// Standard deviation of the pore radius (grid)
    #[structopt(long, default_value = "0.00005")]
    radius_std: f64,

    /// Seed of the pore radius generator (grid)
    #[structopt(long, default_value = "123")]
    radius_seed: u32,

    /// Minimum pore radius (default 1e-5 for grids; no truncation for files)
    #[structopt(long)]
    radius_min: Option<f64>,

    /// Contact angles (degrees), one per grain type, separated by commas
    #[structopt(long, default_value = "65", use_delimiter = true)]
    angles: Vec<f64>,

    /// Invading fluid density (kg/m³)
    #[structopt(long, default_value = "1000.0")]
    invading_density: f64,

    /// Defending fluid density (kg/m³)
    #[structopt(long, default_value = "800.0")]
    defending_density: f64,

    /// Surface tension (N/m)
    #[structopt(long, default_value = "0.05")]
    tension: f64,

    /// Stops after max_iterations + 1 invasions; zero or negative means no limit
    #[structopt(long, default_value = "-1", allow_hyphen_values = true)]
    max_iterations: i64,

    /// Stochastic parameter in [0, 1]
    #[structopt(long, default_value = "0.0")]
    p: f64,

    /// Seed of the random stream used by the selection
    #[structopt(long, default_value = "0")]
    seed: u32,

    /// Output directory
    #[structopt(long, default_value = "/tmp/ipsim/results")]
    out_dir: String,

    /// Stem of the output files
    #[structopt(long, default_value = "ipsim")]
    stem: String,

    /// Prints the invasion steps
    #[structopt(long)]
    verbose: bool,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // network
    let mut network = match (&options.pore_file, &options.throat_file) {
        (Some(pore_file), Some(throat_file)) => {
            let mut network = PoreNetwork::read_text_files(pore_file, throat_file)?;
            network
                .scale_lengths(options.length_factor)?
                .shift_grain(options.grain_offset)?;
            if let Some(min) = options.radius_min {
                network.truncate_radius(min)?;
            }
            network
        }
        (None, None) => {
            let radius = Radius::TruncatedNormal {
                mean: options.radius_mean,
                std_dev: options.radius_std,
                min: options.radius_min.unwrap_or(1e-5),
                seed: options.radius_seed,
            };
            PoreNetwork::new_grid(
                options.nx,
                options.ny,
                options.nz,
                options.cell_size,
                radius,
                Grain::Constant(0),
            )?
        }
        _ => return Err("the pore file and the throat file must be given together"),
    };

    // pressures
    let model = PressureModel::new(
        &options.angles,
        options.invading_density,
        options.defending_density,
        options.tension,
    )?;
    if options.verbose {
        println!("{}", model);
    }
    model.initialize_pores(&mut network)?;

    // run
    let mut sim = Simulation::new(&mut network, &model)?;
    sim.set_verbose(options.verbose);
    let results = sim.run(options.max_iterations, options.p, options.seed)?;

    // write files
    let path_network = format!("{}/{}_network.json", options.out_dir, options.stem);
    let path_results = format!("{}/{}_results.json", options.out_dir, options.stem);
    let path_vtu = format!("{}/{}.vtu", options.out_dir, options.stem);
    network.write_json(&path_network)?;
    results.write_json(&path_results)?;
    paraview_write_vtu(&network, Some(&results), &path_vtu)?;

    // message
    let width = usize::max(path_network.len(), path_results.len());
    let thin_line = format!("{:─^1$}", "", width);
    println!("\n\n{}", thin_line);
    match results.stop_reason {
        Some(reason) => println!("{} invasions; {}. The output files are:", results.len(), reason),
        None => println!("{} invasions. The output files are:", results.len()),
    }
    println!("{}", path_network);
    println!("{}", path_results);
    println!("{}", path_vtu);
    println!("{}\n\n", thin_line);
    Ok(())
}
