//! PyO3 bindings for `paircorr`.
//!
//! Notes
//! - Keep bindings thin: positions and polygons cross the boundary as lists of
//!   `(x, y)` tuples; NumPy conversion is left to the Python wrapper.
//! - Every `PcfError` surfaces as `ValueError` with the Rust message.

use nalgebra::Vector2;
use paircorr::{pair_correlation_2d_with, CorrectionMethod, PairCorrelation, PcfCfg, PcfError};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

type Points = Vec<(f64, f64)>;

fn to_vec2(points: Points) -> Vec<Vector2<f64>> {
    points.into_iter().map(|(x, y)| Vector2::new(x, y)).collect()
}

fn map_err(err: PcfError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn full_output_to_py(py: Python<'_>, out: PairCorrelation) -> PyResult<PyObject> {
    let correction: Vec<Vec<f64>> = (0..out.correction.n_points())
        .map(|i| out.correction.row(i).to_vec())
        .collect();
    let positions: Points = out.positions.iter().map(|p| (p.x, p.y)).collect();
    let dict = PyDict::new_bound(py);
    dict.set_item("g", out.g)?;
    dict.set_item("r", out.r_centers)?;
    dict.set_item("pdf", out.pdf)?;
    dict.set_item("counts", out.counts)?;
    dict.set_item("positions", positions)?;
    dict.set_item("dist_to_boundary", out.dist_to_boundary)?;
    dict.set_item("correction", correction)?;
    dict.set_item("reference", out.reference)?;
    dict.set_item("density", out.density)?;
    dict.set_item("domain_area", out.domain_area)?;
    Ok(dict.into_any().unbind())
}

/// Edge-corrected g(r) and bin centres.
///
/// `border` is the domain shell (convex hull of the positions if omitted),
/// `holes` are exclusion zones, `fast_method` only uses points farther than
/// the largest bin edge from the boundary as reference points. With
/// `full_output=True` a dict with the pdf, counts, kept positions, boundary
/// distances, correction rows and density is returned instead of `(g, r)`.
#[pyfunction]
#[pyo3(signature = (
    positions,
    bin_edges,
    border=None,
    holes=None,
    fast_method=false,
    full_output=false
))]
fn pcf2d(
    py: Python<'_>,
    positions: Points,
    bin_edges: Vec<f64>,
    border: Option<Points>,
    holes: Option<Vec<Points>>,
    fast_method: bool,
    full_output: bool,
) -> PyResult<PyObject> {
    let cfg = PcfCfg {
        domain_polygon: border.map(to_vec2),
        holes: holes.unwrap_or_default().into_iter().map(to_vec2).collect(),
        method: if fast_method {
            CorrectionMethod::Guard
        } else {
            CorrectionMethod::Exact
        },
        ..PcfCfg::default()
    };
    let out = pair_correlation_2d_with(&to_vec2(positions), &bin_edges, &cfg).map_err(map_err)?;
    if full_output {
        full_output_to_py(py, out)
    } else {
        Ok((out.g, out.r_centers).into_py(py))
    }
}

#[pymodule]
fn paircorr_native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(pcf2d, m)?)?;
    m.add("__version__", paircorr::VERSION)?;
    Ok(())
}
