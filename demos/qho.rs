use psix::{ fourier::Method, mesh::PotentialMesh, solve };

// resolve the E = 5/2 eigenstate of the quantum harmonic oscillator and
// carry it to momentum space

fn main() {
    const N: usize = 1025;
    const X_MAX: f64 = 20.0;
    const ENERGY: f64 = 2.5; // second even level of V = x²/2

    // harmonic well centered on the mesh
    let mesh = PotentialMesh::from_fn(N, X_MAX, |x| {
        let xc = x - X_MAX / 2.0;
        xc * xc / 2.0
    })
    .unwrap();
    let center = mesh.index_of_minimum();
    let dx = mesh.get_dx();

    // parity-averaged position-space solution
    let psi = solve::solve_parity_pair(&mesh, ENERGY).unwrap();
    let tp = psi.metadata().turning_points;
    println!("turning points: {} / {}", tp.left, tp.right);

    // per-parity residuals; near zero since 5/2 is a true even eigenvalue
    let even = mesh
        .integrate(ENERGY, solve::Parity::Even)
        .resolve_classical()
        .unwrap();
    println!(
        "left discontinuity: {:.4}",
        even.metadata().left_discontinuity,
    );
    println!(
        "right discontinuity: {:.4}",
        even.metadata().right_discontinuity,
    );

    // momentum-space representation via the interactive-path strategy
    let phi = psi.fourier_transform(center, 0.5, Method::Optimized).unwrap();

    println!("x\tpsi\tphi\tV");
    for i in 0..N {
        let x = (i as f64 + 0.5) * dx - X_MAX / 2.0;
        println!(
            "{:.2}\t{:.2}\t{:.2}\t{:.2}",
            x,
            psi.values()[i].re,
            phi.values()[i].norm(),
            mesh.get_V()[i],
        );
    }
}
