use coursedesk::form::{FieldLens, FormModel};

#[derive(Clone, coursedesk::form::FormModel)]
struct DemoForm {
    email: String,
}

fn main() {
    let fields = DemoForm::fields();
    let lens = fields.email();
    let mut model = DemoForm {
        email: "a@coursedesk.app".to_string(),
    };
    lens.set(&mut model, "b@coursedesk.app".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.get(&model), "b@coursedesk.app");
}
