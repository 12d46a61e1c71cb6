use std::sync::Arc;

use strand_di::{create_injector, Callable, Capabilities, Constructor, Instance, ModuleRegistry};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut registry = ModuleRegistry::new();
    registry
        .define_module("greeting", &[])
        .constant("salutation", "Hello".to_string())
        .value("name", "strand".to_string());
    registry.define_module("app", &["greeting"]).factory(
        "message",
        Callable::from_params("salutation, name", |_, _, args| {
            let salutation = args.get::<String>(0)?;
            let name = args.get::<String>(1)?;
            Ok(Instance::new(format!("{salutation}, {name}!")))
        }),
    );

    let injector = create_injector(&registry, &["app"], false).unwrap();
    println!("{:?}", injector);

    let message = injector.get_as::<String>("message").unwrap();
    println!("{}", message);

    let shouting = Arc::new(Capabilities::new().method("shout", |this| {
        let message = this
            .field_as::<String>("message")
            .ok_or("message is not set")?;
        Ok(Instance::new(message.to_uppercase()))
    }));
    let greeter = Constructor::array(
        ["message"],
        Constructor::new(|_, this, args| {
            this.set_instance("message", args.instance(0)?.clone());
            Ok(None)
        }),
    )
    .with_capabilities(shouting);

    let greeter = injector.instantiate(&greeter, None).unwrap();
    let greeter = greeter.downcast::<strand_di::DynObject>().unwrap();
    println!("{:?}", greeter.call_as::<String>("shout").unwrap());
}
