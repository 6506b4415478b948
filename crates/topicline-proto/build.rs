// Build script to compile protobuf files into Rust code.
//
// Generates the message types and the TopicService client from proto/ at
// compile time. Requires `protoc` on the PATH.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::compile_protos("proto/operation.proto")?;
    tonic_build::compile_protos("proto/scheme.proto")?;

    // Imports the two above; generates TopicServiceClient
    tonic_build::compile_protos("proto/topic.proto")?;

    Ok(())
}
