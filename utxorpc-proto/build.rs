const PROTO_ROOT: &str = "proto";
const PROTOS: [&str; 5] = [
    "utxorpc/v1alpha/cardano.proto",
    "utxorpc/v1alpha/sync.proto",
    "utxorpc/v1alpha/query.proto",
    "utxorpc/v1alpha/submit.proto",
    "utxorpc/v1alpha/watch.proto",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={PROTO_ROOT}");

    // protox parses the schema in process, so no system protoc is needed
    let descriptors = protox::compile(PROTOS, [PROTO_ROOT])?;
    tonic_build::configure()
        .build_server(false)
        .compile_fds(descriptors)?;

    Ok(())
}
