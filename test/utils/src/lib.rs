pub fn flu_payload_fixture() -> &'static str {
    return "You may have flu.\n```json\n{\"items\":[{\"name\":\"Flu\",\"prob\":0.82},{\"name\":\"Cold\",\"prob\":0.31}]}\n```";
}

pub fn nested_confidence_fixture() -> &'static str {
    return r#"
**Bronchitis**
Persistent cough with mucus, often after a cold.
Suggested specialist: **pulmonologist**

**Influenza**
Sudden fever, muscle aches and fatigue.
Suggested specialist: **general practitioner**

```json
{
  "confidence": {
    "items": [
      { "name": "Bronchitis", "prob": 0.55 },
      { "name": "Influenza", "prob": 0.35 }
    ]
  }
}
```
"#;
}

pub fn multiple_fences_fixture() -> &'static str {
    return r#"
Here's what I found.

```text
fever: 38.5
```

```json
{"items":[{"name":"Migraine","prob":0.6}]}
```

And a second block that should be left alone.

```json
{"items":[{"name":"Ignored","prob":0.1}]}
```
"#
    .trim();
}

pub fn analyses_fixture() -> &'static str {
    return r#"
[
  {
    "id": 42,
    "created_at": "2025-03-02T10:15:00.123456Z",
    "symptoms": "fever and cough",
    "result_md": "You may have flu.\n```json\n{\"items\":[{\"name\":\"Flu\",\"prob\":0.82},{\"name\":\"Cold\",\"prob\":0.31}]}\n```",
    "confidence_json": {"items":[{"name":"Flu","prob":0.82},{"name":"Cold","prob":0.31}]}
  },
  {
    "id": 41,
    "created_at": "2025-03-01T08:00:00Z",
    "symptoms": "headache behind the eyes\nworse in the morning",
    "result_md": "Likely tension headache.\n```json\n{\"items\": [{\"name\": \"Tension\"\n```",
    "confidence_json": null
  }
]
"#
    .trim();
}
