use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::DVector;
use mimic_retargeting::{
    motion::clip::MocapFrame,
    retargeting::{
        frame_sync::{sync_frame, sync_frame_into},
        state_vector::StateVectorBuilder,
    },
    rotation::{convention::SequentialDegrees, representation::RepresentationMode},
    simulation::skeleton_state::SkeletonState,
    skeleton::{dof_map::SkeletonDofMap, joint_spec::JointSpec},
};

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        convention_to_rotating_radians,
        convention_to_sequential_degrees,
        dof_map_new,
        frame_sync_sync_frame,
        frame_sync_sync_frame_into,
        state_vector_build_euler,
        state_vector_build_quaternion,
}

criterion_main!(benches);

const JOINTS: [(&str, &str); 12] = [
    ("lowerback", "xyz"),
    ("upperback", "xyz"),
    ("thorax", "xyz"),
    ("lowerneck", "xyz"),
    ("upperneck", "xyz"),
    ("head", "xyz"),
    ("lfemur", "xyz"),
    ("ltibia", "x"),
    ("lfoot", "xz"),
    ("rfemur", "xyz"),
    ("rtibia", "x"),
    ("rfoot", "xz"),
];

fn create_skeleton() -> (Vec<String>, Vec<JointSpec>) {
    let mut dof_names: Vec<String> = ["rx", "ry", "rz", "tx", "ty", "tz"]
        .iter()
        .map(|axis| format!("root_{}", axis))
        .collect();
    let mut joints = Vec::new();
    for (name, order) in JOINTS {
        for axis in order.chars() {
            dof_names.push(format!("{}_{}", name, axis));
        }

        joints.push(JointSpec::new(name.to_string(), order.parse().unwrap()));
    }

    (dof_names, joints)
}

fn create_frame() -> MocapFrame {
    let mut entries = vec![(
        "root".to_string(),
        vec![0.1, 17.5, -3.2, -12.0, 4.5, 91.0],
    )];
    for (i, (name, order)) in JOINTS.iter().enumerate() {
        let values = (0..order.len()).map(|a| (i * 3 + a) as f64 - 10.0).collect();
        entries.push((name.to_string(), values));
    }

    MocapFrame::new(entries)
}

pub fn convention_to_rotating_radians(c: &mut Criterion) {
    let angles = SequentialDegrees::new(10.0, 20.0, 30.0);

    c.bench_function("SequentialDegrees::to_rotating_radians", |b| {
        b.iter(|| black_box(&angles).to_rotating_radians())
    });
}

pub fn convention_to_sequential_degrees(c: &mut Criterion) {
    let angles = SequentialDegrees::new(10.0, 20.0, 30.0).to_rotating_radians();

    c.bench_function("RotatingRadians::to_sequential_degrees", |b| {
        b.iter(|| black_box(&angles).to_sequential_degrees())
    });
}

pub fn dof_map_new(c: &mut Criterion) {
    let (dof_names, joints) = create_skeleton();

    c.bench_function("SkeletonDofMap::new", |b| {
        b.iter(|| SkeletonDofMap::new(black_box(&dof_names), black_box(&joints)))
    });
}

pub fn frame_sync_sync_frame(c: &mut Criterion) {
    let (dof_names, joints) = create_skeleton();
    let map = SkeletonDofMap::new(&dof_names, &joints).unwrap();
    let frame = create_frame();

    c.bench_function("frame_sync::sync_frame", |b| {
        b.iter(|| sync_frame(&map, black_box(&frame)))
    });
}

pub fn frame_sync_sync_frame_into(c: &mut Criterion) {
    let (dof_names, joints) = create_skeleton();
    let map = SkeletonDofMap::new(&dof_names, &joints).unwrap();
    let frame = create_frame();
    let mut positions = DVector::zeros(map.total_dofs());

    c.bench_function("frame_sync::sync_frame_into", |b| {
        b.iter(|| sync_frame_into(&map, black_box(&frame), &mut positions))
    });
}

fn bench_state_vector(c: &mut Criterion, name: &str, mode: RepresentationMode) {
    let (dof_names, joints) = create_skeleton();
    let map = SkeletonDofMap::new(&dof_names, &joints).unwrap();
    let positions = sync_frame(&map, &create_frame()).unwrap();
    let velocities = DVector::from_element(map.total_dofs(), 0.05);
    let state = SkeletonState::new(positions, velocities).unwrap();
    let builder = StateVectorBuilder::new(mode);

    c.bench_function(name, |b| b.iter(|| builder.build(&map, black_box(&state))));
}

pub fn state_vector_build_euler(c: &mut Criterion) {
    bench_state_vector(c, "StateVectorBuilder::<Euler>::build", RepresentationMode::Euler);
}

pub fn state_vector_build_quaternion(c: &mut Criterion) {
    bench_state_vector(
        c,
        "StateVectorBuilder::<Quaternion>::build",
        RepresentationMode::Quaternion,
    );
}
