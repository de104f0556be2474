fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/gtfs-realtime.proto");

    // prost-build shells out to protoc; point it at the vendored binary so
    // the build does not depend on a system install.
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);

    prost_build::compile_protos(&["proto/gtfs-realtime.proto"], &["proto/"])?;

    Ok(())
}
