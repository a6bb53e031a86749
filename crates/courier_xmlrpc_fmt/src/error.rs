use std::fmt::Display;

error_chain! {
    errors {
        /// The response body could not be parsed as an XML document at all.
        MalformedDocument(reason: String) {
            description("malformed XML-RPC document")
            display("malformed XML-RPC document: {}", reason)
        }

        Serialization(reason: String) {
            description("failed to convert a value into XML-RPC")
            display("failed to convert a value into XML-RPC: {}", reason)
        }

        Deserialization(reason: String) {
            description("failed to convert XML-RPC into a value")
            display("failed to convert XML-RPC into a value: {}", reason)
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        ErrorKind::Serialization(msg.to_string()).into()
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        ErrorKind::Deserialization(msg.to_string()).into()
    }
}
