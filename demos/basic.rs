use attr_config::{AttrOptions, ConfigClass, Scopes};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ServerSettings {
    host: String,
    port: u16,
    token: String,
}

fn main() -> Result<(), attr_config::Error> {
    let server = ConfigClass::new("Server");
    server.attr_config("host", AttrOptions::new().with_default("localhost"));
    server.attr_config("port", AttrOptions::new().with_default(8080));
    server.attr_config(
        "token",
        AttrOptions::new()
            .with_default("changeme")
            .readable(Scopes::hidden())
            .writable(Scopes::hidden()),
    );

    server.configure_from_toml(
        r#"
        host = "0.0.0.0"
        token = "s3cret"
        "#,
    )?;

    let mut instance = server.instantiate();
    instance.write("port", 9090)?;

    println!("Server.host = {:?}", server.read("host")?);
    println!("Server#port = {:?}", instance.read("port")?);
    if let Err(e) = server.read("token") {
        println!("{e}");
    }

    let settings: ServerSettings = instance.config().deserialize()?;
    println!("{settings:?}");

    Ok(())
}
